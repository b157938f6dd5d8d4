//! # Dimension Engine Properties
//!
//! End-to-end checks through the public API:
//!
//! 1. **Fallbacks**: missing fonts, children and zero divisors resolve to
//!    defined values
//! 2. **Operators**: empty operands and invalid tags
//! 3. **Ownership**: clones serialize identically and are independent
//! 4. **Markup**: write, re-read and re-evaluate in several contexts
//! 5. **Caching**: font size changes reach cached areas
//!
//! Run with: cargo test --package veneer_ui --test dimension_properties

use veneer_core::{ScalarUnit, Size, URect};
use veneer_ui::dimension::{
    DimensionOperator, DimensionRole, FontMetric, FontMetricKind, ImageMetric, ImageMetricKind,
    OperatorNode, PropertyMetric, RoleAxis, UnifiedDim, WidgetMetric,
};
use veneer_ui::{
    ComponentArea, DimensionError, DimensionNode, ElementBuilder, EvalContext, LayoutCache,
    ResourceProvider, SemanticDimension, SkinConfig, WidgetId, WidgetState, WidgetTree, XmlWriter,
};

const SKIN: &str = r#"
    display_width = 1024
    display_height = 768

    [[fonts]]
    name = "body"
    native_size = 10
    line_spacing = 12
    baseline = 9
    advance = 5

    [[images]]
    name = "grip"
    width = 6
    height = 18
"#;

fn tree_with_window(width: f32, height: f32) -> (WidgetTree, WidgetId) {
    let config = SkinConfig::from_toml_str(SKIN).unwrap();
    let mut tree = WidgetTree::from_config(&config);
    let id = tree.next_id();
    tree.add_root(
        WidgetState::new(id, "window")
            .with_area(URect::new(
                ScalarUnit::ZERO,
                ScalarUnit::ZERO,
                ScalarUnit::absolute(width),
                ScalarUnit::absolute(height),
            ))
            .with_font("body")
            .with_text("Title"),
    );
    (tree, id)
}

fn evaluate(tree: &WidgetTree, id: WidgetId, node: &DimensionNode) -> Result<f32, DimensionError> {
    let widget = tree.widget(id).unwrap();
    node.evaluate(&EvalContext::new(&widget, tree))
}

fn to_text(node: &DimensionNode) -> String {
    let mut writer = XmlWriter::new();
    node.write_xml(&mut writer);
    writer.finish()
}

fn every_variant() -> Vec<DimensionNode> {
    vec![
        DimensionNode::Literal(7.5),
        UnifiedDim::new(ScalarUnit::new(0.25, 3.0), DimensionRole::Height).into(),
        FontMetric::new(FontMetricKind::HorizontalExtent)
            .with_widget("caption")
            .with_text("OK")
            .with_padding(1.5)
            .into(),
        ImageMetric::named("grip", ImageMetricKind::Width).into(),
        ImageMetric::from_property("Icon", ImageMetricKind::YOffset).into(),
        WidgetMetric::new(DimensionRole::RightEdge).with_widget("caption").into(),
        PropertyMetric::unified("Inset", RoleAxis::Horizontal).into(),
        OperatorNode::builder(DimensionOperator::Divide)
            .with_left(DimensionNode::Literal(10.0))
            .with_right(DimensionNode::Literal(4.0))
            .build()
            .unwrap()
            .into(),
    ]
}

// ============================================================================
// FALLBACKS
// ============================================================================

#[test]
fn literal_plus_unresolved_font_is_literal_plus_padding() {
    let mut tree = WidgetTree::default();
    let id = tree.next_id();
    tree.add_root(WidgetState::new(id, "plain"));

    let node = DimensionNode::from(
        OperatorNode::builder(DimensionOperator::Add)
            .with_left(DimensionNode::Literal(10.0))
            .with_right(FontMetric::new(FontMetricKind::LineSpacing).with_padding(2.0))
            .build()
            .unwrap(),
    );
    assert_eq!(evaluate(&tree, id, &node), Ok(12.0));
}

#[test]
fn widget_offsets_measure_zero() {
    let (tree, id) = tree_with_window(300.0, 200.0);
    for role in [DimensionRole::XOffset, DimensionRole::YOffset] {
        let node = DimensionNode::from(WidgetMetric::new(role));
        assert_eq!(evaluate(&tree, id, &node), Ok(0.0));
    }
}

#[test]
fn divide_by_zero_result_is_zero() {
    let (tree, id) = tree_with_window(300.0, 200.0);
    let zero_width = DimensionNode::from(
        OperatorNode::builder(DimensionOperator::Divide)
            .with_left(DimensionNode::Literal(50.0))
            .with_right(WidgetMetric::new(DimensionRole::Width).with_widget("missing"))
            .build()
            .unwrap(),
    );
    assert_eq!(evaluate(&tree, id, &zero_width), Ok(0.0));
}

#[test]
fn missing_image_and_property_resolve_to_zero() {
    let (tree, id) = tree_with_window(300.0, 200.0);
    let nodes = [
        DimensionNode::from(ImageMetric::named("nowhere", ImageMetricKind::Height)),
        DimensionNode::from(ImageMetric::from_property("Icon", ImageMetricKind::Width)),
        DimensionNode::from(PropertyMetric::new("Spacing")),
    ];
    for node in &nodes {
        assert_eq!(evaluate(&tree, id, node), Ok(0.0));
    }
    let grip = DimensionNode::from(ImageMetric::named("grip", ImageMetricKind::Height));
    assert_eq!(evaluate(&tree, id, &grip), Ok(18.0));
}

// ============================================================================
// OPERATORS
// ============================================================================

#[test]
fn empty_operator_is_zero_for_every_valid_tag() {
    let (tree, id) = tree_with_window(300.0, 200.0);
    let tags = [
        DimensionOperator::Noop,
        DimensionOperator::Add,
        DimensionOperator::Subtract,
        DimensionOperator::Multiply,
        DimensionOperator::Divide,
    ];
    for op in tags {
        let node = DimensionNode::from(OperatorNode::new(op));
        assert_eq!(evaluate(&tree, id, &node), Ok(0.0), "operator {op}");
    }

    let invalid = DimensionNode::from(OperatorNode::new(DimensionOperator::Invalid));
    assert!(matches!(
        evaluate(&tree, id, &invalid),
        Err(DimensionError::InvalidRequest(_))
    ));
}

#[test]
fn invalid_dimension_fails_only_its_own_area() {
    let (tree, id) = tree_with_window(300.0, 200.0);
    let cache = LayoutCache::new();

    let broken = ComponentArea {
        left: SemanticDimension::new(
            WidgetMetric::new(DimensionRole::Invalid),
            DimensionRole::LeftEdge,
        ),
        ..ComponentArea::default()
    };
    assert!(cache.resolve(&tree, id, "Broken", &broken).is_err());
    assert!(cache.resolve(&tree, id, "Whole", &ComponentArea::default()).is_ok());
    assert_eq!(cache.len(), 1);
}

// ============================================================================
// OWNERSHIP
// ============================================================================

#[test]
fn clones_serialize_identically() {
    for node in every_variant() {
        let copy = node.clone();
        assert_eq!(to_text(&copy), to_text(&node));
    }
}

#[test]
fn mutating_a_clone_leaves_the_original_alone() {
    let original = DimensionNode::from(
        OperatorNode::builder(DimensionOperator::Add)
            .with_left(DimensionNode::Literal(1.0))
            .with_right(DimensionNode::Literal(2.0))
            .build()
            .unwrap(),
    );
    let before = to_text(&original);

    let mut copy = original.clone();
    if let DimensionNode::Operator(node) = &mut copy {
        node.set_op(DimensionOperator::Multiply);
        node.set_left(Some(DimensionNode::Literal(100.0)));
    }

    assert_eq!(to_text(&original), before);
    assert_ne!(to_text(&copy), before);
}

// ============================================================================
// MARKUP
// ============================================================================

#[test]
fn three_level_tree_survives_markup() {
    let half_width = UnifiedDim::new(ScalarUnit::new(0.5, 0.0), DimensionRole::Width);
    let third_height = UnifiedDim::new(ScalarUnit::new(0.3, 1.0), DimensionRole::Height);
    let original = DimensionNode::from(
        OperatorNode::builder(DimensionOperator::Add)
            .with_left(
                OperatorNode::builder(DimensionOperator::Multiply)
                    .with_left(half_width)
                    .with_right(third_height)
                    .build()
                    .unwrap(),
            )
            .with_right(DimensionNode::Literal(6.0))
            .build()
            .unwrap(),
    );

    let mut builder = ElementBuilder::new();
    original.write_xml(&mut builder);
    let reparsed = DimensionNode::from_element(&builder.into_root().unwrap()).unwrap();
    assert_eq!(to_text(&reparsed), to_text(&original));

    for (width, height) in [(300.0, 200.0), (64.0, 48.0), (1.0, 0.0)] {
        let (tree, id) = tree_with_window(width, height);
        assert_eq!(
            evaluate(&tree, id, &reparsed),
            evaluate(&tree, id, &original),
            "window {width}x{height}"
        );
    }
}

#[test]
fn every_variant_survives_markup() {
    for node in every_variant() {
        let mut builder = ElementBuilder::new();
        node.write_xml(&mut builder);
        let element = builder.into_root().unwrap();
        assert_eq!(DimensionNode::from_element(&element), Ok(node));
    }
}

#[test]
fn area_survives_markup() {
    let area = ComponentArea::new(
        SemanticDimension::new(DimensionNode::Literal(4.0), DimensionRole::LeftEdge),
        SemanticDimension::new(FontMetric::new(FontMetricKind::Baseline), DimensionRole::TopEdge),
        SemanticDimension::new(
            UnifiedDim::new(ScalarUnit::new(1.0, -4.0), DimensionRole::RightEdge),
            DimensionRole::RightEdge,
        ),
        SemanticDimension::new(
            ImageMetric::named("grip", ImageMetricKind::Height),
            DimensionRole::Height,
        ),
    )
    .with_area_property("ClientArea");

    let mut builder = ElementBuilder::new();
    area.write_xml(&mut builder);
    let element = builder.into_root().unwrap();
    assert_eq!(ComponentArea::from_element(&element), Ok(area.clone()));

    // no ClientArea property on the widget, so the dimensions apply
    let (tree, id) = tree_with_window(300.0, 200.0);
    let widget = tree.widget(id).unwrap();
    let rect = area.pixel_rect(&EvalContext::new(&widget, &tree)).unwrap();
    assert_eq!((rect.x, rect.y, rect.width, rect.height), (4.0, 9.0, 292.0, 18.0));
}

// ============================================================================
// CACHING
// ============================================================================

#[test]
fn font_size_change_invalidates_dependent_areas() {
    let (mut tree, id) = tree_with_window(300.0, 200.0);
    let cache = LayoutCache::new();

    let caption = ComponentArea {
        bottom_or_height: SemanticDimension::new(
            FontMetric::new(FontMetricKind::LineSpacing),
            DimensionRole::Height,
        ),
        ..ComponentArea::default()
    };
    assert_eq!(cache.resolve(&tree, id, "Caption", &caption).unwrap().height, 12.0);
    cache.resolve(&tree, id, "Frame", &ComponentArea::default()).unwrap();

    tree.set_font_point_size("body", 15.0);
    let body = tree.font("body").unwrap();
    assert_eq!(cache.font_size_changed(&tree, body), 1);

    assert_eq!(cache.resolve(&tree, id, "Caption", &caption).unwrap().height, 18.0);
    assert_eq!(tree.display_size(), Size::new(1024.0, 768.0));
}

#[test]
fn configured_nesting_limit_applies_to_areas() {
    let config = SkinConfig::from_toml_str("max_nesting_depth = 3").unwrap();
    let area = ComponentArea {
        left: SemanticDimension::new(
            OperatorNode::builder(DimensionOperator::Add)
                .with_left(DimensionNode::Literal(1.0))
                .build()
                .unwrap(),
            DimensionRole::LeftEdge,
        ),
        ..ComponentArea::default()
    };
    let mut builder = ElementBuilder::new();
    area.write_xml(&mut builder);
    let element = builder.into_root().unwrap();

    // Area > Dim > OperatorDim > LiteralDim
    assert_eq!(
        ComponentArea::from_element_limited(&element, config.max_nesting_depth),
        Err(DimensionError::NestingTooDeep(3))
    );
    assert_eq!(ComponentArea::from_element_limited(&element, 4), Ok(area));
}
