use anyhow::Result;
use rigkit_api_core::AttrValue;
use rigkit_components::{
    build_controls, Cog, Component, ComponentData, ComponentError, ControlSpec,
};
use rigkit_core::{AttrType, RigContext, Side};
use rigkit_scene_core::{MemoryScene, SceneGraph};
use rigkit_test_fixtures::components;

fn ctx() -> RigContext<MemoryScene> {
    RigContext::with_scene(MemoryScene::new())
}

#[test]
fn cog_builds_one_locked_control_under_its_group() -> Result<()> {
    let mut ctx = ctx();
    let built = Cog.build(&mut ctx)?;
    assert_eq!(built.group.name(), "M_cog_GRP");
    assert_eq!(built.controls.len(), 1);

    let cog = built.control("cog").expect("cog control");
    assert_eq!(cog.name(), "M_cog");
    let h = cog.handle().expect("bound");
    assert_eq!(ctx.scene.node_primitive(h)?, "transform");
    assert_eq!(ctx.scene.parent_of(h)?, built.group.handle());

    assert_eq!(cog.get_attr(&ctx, "translateY")?, AttrValue::Double(25.0));
    assert_eq!(cog.get_attr(&ctx, "rotateX")?, AttrValue::Double(0.0));

    let header = cog.attribute("COG").expect("header attribute");
    assert_eq!(header.semantic_type, AttrType::Header);
    assert!(!ctx.scene.attr_state(h, "COG")?.keyable);

    for attr in ["scaleX", "scaleY", "scaleZ", "visibility"] {
        let state = ctx.scene.attr_state(h, attr)?;
        assert!(state.locked, "{attr}");
        assert!(!state.keyable, "{attr}");
    }
    assert!(!ctx.scene.attr_state(h, "translateX")?.locked);
    Ok(())
}

#[test]
fn cog_fixture_matches_the_component() -> Result<()> {
    let controls: Vec<ControlSpec> = components::controls("cog")?;
    assert_eq!(controls, Cog.controls());

    let mut ctx = ctx();
    let built = build_controls(&mut ctx, "cog", Side::M, &controls)?;
    assert_eq!(built.group.name(), components::group("cog")?);
    Ok(())
}

#[test]
fn spine_fixture_chains_parents() -> Result<()> {
    let controls = ControlSpec::list_from_json(&components::controls_json("spine")?)?;
    let spine = ComponentData {
        name: "spine".into(),
        side: Side::M,
        controls,
    };
    let mut ctx = ctx();
    let built = spine.build(&mut ctx)?;
    assert_eq!(built.group.name(), components::group("spine")?);

    let names: Vec<&str> = built.controls.values().map(|n| n.name()).collect();
    assert_eq!(names, vec!["M_hips", "M_chest", "M_head"]);

    let handle = |name: &str| built.control(name).and_then(|n| n.handle());
    assert_eq!(ctx.scene.parent_of(handle("hips").unwrap())?, built.group.handle());
    assert_eq!(ctx.scene.parent_of(handle("chest").unwrap())?, handle("hips"));
    assert_eq!(ctx.scene.parent_of(handle("head").unwrap())?, handle("chest"));

    let head = built.control("head").unwrap();
    assert_eq!(head.get_attr(&ctx, "rotateX")?, AttrValue::Double(-10.0));
    Ok(())
}

#[test]
fn side_outside_the_config_fails_before_controls_exist() {
    let mut ctx = ctx();
    ctx.config.sides = vec![Side::L, Side::R];
    let err = Cog.build(&mut ctx).unwrap_err();
    assert!(matches!(err, ComponentError::Rig(_)));
    assert_eq!(err.category(), "configuration");
    assert_eq!(ctx.scene.node_count(), 0);
}

#[test]
fn bad_control_data_creates_nothing() {
    let mut ctx = ctx();
    let controls = vec![ControlSpec::new("chest", Side::M, "circle").parent("hips")];
    let err = build_controls(&mut ctx, "spine", Side::M, &controls).unwrap_err();
    assert!(matches!(err, ComponentError::UnknownParent { .. }));
    assert_eq!(ctx.scene.node_count(), 0);
}
