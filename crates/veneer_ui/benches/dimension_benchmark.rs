//! Benchmark for dimension evaluation and markup.
//!
//! Run with: cargo bench --package veneer_ui --bench dimension_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use veneer_core::{ScalarUnit, Size, URect};
use veneer_ui::dimension::{
    DimensionOperator, DimensionRole, FontMetric, FontMetricKind, OperatorNode, UnifiedDim,
    WidgetMetric,
};
use veneer_ui::{
    BitmapFont, ComponentArea, DimensionNode, ElementBuilder, EvalContext, LayoutCache,
    ResourceCache, SemanticDimension, WidgetId, WidgetState, WidgetTree, XmlWriter,
};

fn create_test_tree() -> (WidgetTree, WidgetId) {
    let mut resources = ResourceCache::new(Size::new(1920.0, 1080.0));
    resources.add_font(BitmapFont::new("mono", 12.0));
    let mut tree = WidgetTree::new(resources);

    let root = tree.next_id();
    tree.add_root(WidgetState::new(root, "desktop"));

    // Nest 20 panels, each inset by 4 pixels on every side
    let mut parent = root;
    for i in 0..20 {
        let id = tree.next_id();
        tree.add_child(
            parent,
            WidgetState::new(id, format!("panel{i}"))
                .with_area(URect::new(
                    ScalarUnit::absolute(4.0),
                    ScalarUnit::absolute(4.0),
                    ScalarUnit::new(1.0, -4.0),
                    ScalarUnit::new(1.0, -4.0),
                ))
                .with_font("mono")
                .with_text("Inventory"),
        );
        parent = id;
    }

    (tree, parent)
}

/// Balanced operator tree of the given depth over unified and font leaves.
fn create_expression(depth: u32) -> DimensionNode {
    if depth == 0 {
        return UnifiedDim::new(ScalarUnit::new(0.5, 2.0), DimensionRole::Width).into();
    }
    let op = if depth % 2 == 0 {
        DimensionOperator::Add
    } else {
        DimensionOperator::Multiply
    };
    OperatorNode::builder(op)
        .with_left(create_expression(depth - 1))
        .with_right(FontMetric::new(FontMetricKind::HorizontalExtent).with_padding(1.0))
        .build()
        .unwrap()
        .into()
}

fn benchmark_evaluate(c: &mut Criterion) {
    let (tree, leaf) = create_test_tree();
    let widget = tree.widget(leaf).unwrap();
    let ctx = EvalContext::new(&widget, &tree);
    let expression = create_expression(8);

    c.bench_function("evaluate_depth_8_leaf_of_20", |b| {
        b.iter(|| black_box(expression.evaluate(black_box(&ctx))));
    });
}

fn benchmark_area(c: &mut Criterion) {
    let (tree, leaf) = create_test_tree();
    let widget = tree.widget(leaf).unwrap();
    let ctx = EvalContext::new(&widget, &tree);
    let area = ComponentArea {
        right_or_width: SemanticDimension::new(
            WidgetMetric::new(DimensionRole::Height),
            DimensionRole::Width,
        ),
        ..ComponentArea::default()
    };

    c.bench_function("area_pixel_rect", |b| {
        b.iter(|| black_box(area.pixel_rect(&ctx)));
    });

    let cache = LayoutCache::new();
    c.bench_function("area_cached_resolve", |b| {
        b.iter(|| black_box(cache.resolve(&tree, leaf, "Client", &area)));
    });
}

fn benchmark_markup(c: &mut Criterion) {
    let expression = create_expression(8);

    c.bench_function("write_xml_depth_8", |b| {
        b.iter(|| {
            let mut writer = XmlWriter::new();
            expression.write_xml(&mut writer);
            black_box(writer.finish())
        });
    });

    let mut builder = ElementBuilder::new();
    expression.write_xml(&mut builder);
    let element = builder.into_root().unwrap();

    c.bench_function("from_element_depth_8", |b| {
        b.iter(|| black_box(DimensionNode::from_element(black_box(&element))));
    });
}

fn benchmark_clone(c: &mut Criterion) {
    let expression = create_expression(8);

    c.bench_function("clone_depth_8", |b| {
        b.iter(|| black_box(expression.clone()));
    });
}

criterion_group!(
    benches,
    benchmark_evaluate,
    benchmark_area,
    benchmark_markup,
    benchmark_clone
);
criterion_main!(benches);
