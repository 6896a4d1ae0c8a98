use rigkit_api_core::AttrValue;
use rigkit_core::{connect, link, AttrSpec, Node, RigConfig, RigContext, RigError};
use rigkit_scene_core::{MemoryScene, SceneGraph};

fn ctx() -> RigContext<MemoryScene> {
    RigContext::with_scene(MemoryScene::new())
}

fn flags(ctx: &RigContext<MemoryScene>, node: &Node, attr: &str) -> (bool, bool, bool) {
    let state = ctx.scene.attr_state(node.handle().unwrap(), attr).unwrap();
    (state.keyable, state.locked, state.shown_in_inspector())
}

#[test]
fn lock_expands_compound_names() {
    let mut ctx = ctx();
    let n = Node::create(&mut ctx, "control", "cog", Some("M")).unwrap();
    n.attr_lock(&mut ctx, &["s", "visibility"], None).unwrap();
    for attr in ["scaleX", "scaleY", "scaleZ", "visibility"] {
        assert_eq!(flags(&ctx, &n, attr), (false, true, false), "{attr}");
    }
    assert_eq!(flags(&ctx, &n, "translateX"), (true, false, true));

    n.attr_unlock(&mut ctx, &["scale"], None).unwrap();
    for attr in ["scaleX", "scaleY", "scaleZ"] {
        assert_eq!(flags(&ctx, &n, attr), (true, false, true), "{attr}");
    }
}

#[test]
fn show_defaults_follow_the_config() {
    let config = RigConfig {
        lock_show: true,
        ..RigConfig::default()
    };
    let mut ctx = RigContext::new(MemoryScene::new(), config);
    let n = Node::create(&mut ctx, "control", "cog", Some("M")).unwrap();
    n.attr_lock(&mut ctx, &["r"], None).unwrap();
    assert_eq!(flags(&ctx, &n, "rotateY"), (false, true, true));
    n.attr_lock(&mut ctx, &["r"], Some(false)).unwrap();
    assert_eq!(flags(&ctx, &n, "rotateY"), (false, true, false));
}

#[test]
fn locked_attribute_refuses_writes() {
    let mut ctx = ctx();
    let n = Node::create(&mut ctx, "control", "cog", Some("M")).unwrap();
    n.attr_lock(&mut ctx, &["translateY"], None).unwrap();
    let err = n.attr_set(&mut ctx, "translateY", 3.0).unwrap_err();
    assert!(matches!(err, RigError::LockedAttribute { .. }));
    assert_eq!(err.category(), "locked_attribute");
    assert_eq!(
        n.get_attr(&ctx, "translateY").unwrap(),
        AttrValue::Double(0.0)
    );
}

#[test]
fn failed_lock_restores_the_axes_already_applied() {
    let mut ctx = ctx();
    let n = Node::create(&mut ctx, "control", "cog", Some("M")).unwrap();
    n.attr_lock(&mut ctx, &["translateZ"], Some(true)).unwrap();

    let err = n.attr_lock(&mut ctx, &["t", "missing"], None).unwrap_err();
    assert_eq!(err.category(), "scene");
    assert_eq!(flags(&ctx, &n, "translateX"), (true, false, true));
    assert_eq!(flags(&ctx, &n, "translateY"), (true, false, true));
    // previously locked axis keeps its earlier lock
    assert_eq!(flags(&ctx, &n, "translateZ"), (false, true, true));
}

#[test]
fn attr_state_sets_all_three_flags() {
    let mut ctx = ctx();
    let mut n = Node::create(&mut ctx, "control", "hand", Some("L")).unwrap();
    n.add_attr(&mut ctx, &AttrSpec::new("fkIk", "slider")).unwrap();
    n.attr_state(&mut ctx, &["fkIk"], false, false, true).unwrap();
    assert_eq!(flags(&ctx, &n, "fkIk"), (false, false, true));
    n.attr_state(&mut ctx, &["fkIk"], false, true, false).unwrap();
    assert_eq!(flags(&ctx, &n, "fkIk"), (false, true, false));
}

#[test]
fn non_keyable_visible_attribute_is_shown() {
    let mut ctx = ctx();
    let mut n = Node::create(&mut ctx, "control", "hand", Some("L")).unwrap();
    n.add_attr(&mut ctx, &AttrSpec::new("segments", "long").keyable(false))
        .unwrap();
    n.add_attr(
        &mut ctx,
        &AttrSpec::new("debug", "bool").keyable(false).hidden(true),
    )
    .unwrap();
    assert_eq!(flags(&ctx, &n, "segments"), (false, false, true));
    assert_eq!(flags(&ctx, &n, "debug"), (false, false, false));
}

#[test]
fn forced_link_that_fails_restores_replaced_drivers() {
    let mut ctx = ctx();
    let a = Node::create(&mut ctx, "transform", "a", None).unwrap();
    let b = Node::create(&mut ctx, "transform", "b", None).unwrap();
    let c = Node::create(&mut ctx, "transform", "c", None).unwrap();
    connect(&mut ctx, &c, "translateZ", &b, "translateZ", false).unwrap();

    let err = link(&mut ctx, &a, &["t", "missing"], &b, true).unwrap_err();
    assert_eq!(err.category(), "scene");
    assert_eq!(ctx.scene.connection_count(), 1);
    let driver = ctx
        .scene
        .driver_of(&b.plug(&ctx.scene, "translateZ").unwrap())
        .unwrap();
    assert_eq!(driver, Some(c.plug(&ctx.scene, "translateZ").unwrap()));
}

#[test]
fn forced_link_replaces_drivers() {
    let mut ctx = ctx();
    let a = Node::create(&mut ctx, "transform", "a", None).unwrap();
    let b = Node::create(&mut ctx, "transform", "b", None).unwrap();
    let c = Node::create(&mut ctx, "transform", "c", None).unwrap();
    connect(&mut ctx, &c, "rotateX", &b, "rotateX", false).unwrap();

    link(&mut ctx, &a, &["r", "visibility"], &b, true).unwrap();
    assert_eq!(ctx.scene.connection_count(), 4);
    for attr in ["rotateX", "rotateY", "rotateZ", "visibility"] {
        let driver = ctx.scene.driver_of(&b.plug(&ctx.scene, attr).unwrap()).unwrap();
        assert_eq!(driver, Some(a.plug(&ctx.scene, attr).unwrap()), "{attr}");
    }
}

#[test]
fn link_into_locked_destination_is_refused() {
    let mut ctx = ctx();
    let a = Node::create(&mut ctx, "transform", "a", None).unwrap();
    let b = Node::create(&mut ctx, "transform", "b", None).unwrap();
    b.attr_lock(&mut ctx, &["scaleY"], None).unwrap();
    let err = link(&mut ctx, &a, &["s"], &b, true).unwrap_err();
    assert!(matches!(err, RigError::LockedAttribute { .. }));
    assert_eq!(ctx.scene.connection_count(), 0);
}

#[test]
fn lock_leaves_headers_visible_and_unlocked() {
    let mut ctx = ctx();
    let mut foot = Node::create(&mut ctx, "control", "foot", Some("R")).unwrap();
    foot.add_attr(&mut ctx, &AttrSpec::header("IK")).unwrap();
    foot.add_attr(&mut ctx, &AttrSpec::new("roll", "float")).unwrap();

    foot.attr_lock(&mut ctx, &["IK", "roll"], None).unwrap();
    assert_eq!(flags(&ctx, &foot, "IK"), (false, false, true));
    assert_eq!(flags(&ctx, &foot, "roll"), (false, true, false));

    foot.attr_state(&mut ctx, &["IK"], true, true, false).unwrap();
    assert_eq!(flags(&ctx, &foot, "IK"), (false, false, true));
}
