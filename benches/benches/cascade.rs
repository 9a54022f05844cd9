// Copyright 2025 the Cascara Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `cascara_property` + `cascara_style`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use cascara_dirty::DirtySet;
use cascara_property::{Property, PropertyId, PropertyRegistry};
use cascara_style::{
    Definition, DefinitionCache, ElementStyle, NoEffects, PseudoClassSet, RuleId, RuleNode,
    Specificity, StyleCx, StyleHost,
};
use peniko::color::Rgba8;

struct Elem {
    parent: Option<usize>,
    children: Vec<usize>,
    style: ElementStyle,
}

/// A tree where every element matches the rules of its classes.
struct Tree {
    elems: Vec<Elem>,
    rules: Vec<(&'static str, RuleNode)>,
    cache: DefinitionCache,
}

impl Tree {
    /// A root with `fanout` children per element, `depth` levels deep.
    fn new(depth: u32, fanout: usize, rules: Vec<(&'static str, RuleNode)>) -> Self {
        let mut elems = vec![Elem {
            parent: None,
            children: Vec::new(),
            style: ElementStyle::new(),
        }];
        let mut level = vec![0];
        for _ in 0..depth {
            let mut next = Vec::new();
            for &parent in &level {
                for _ in 0..fanout {
                    let key = elems.len();
                    elems.push(Elem {
                        parent: Some(parent),
                        children: Vec::new(),
                        style: ElementStyle::new(),
                    });
                    elems[parent].children.push(key);
                    next.push(key);
                }
            }
            level = next;
        }
        Self {
            elems,
            rules,
            cache: DefinitionCache::new(),
        }
    }
}

impl StyleHost for Tree {
    type Key = usize;

    fn parent(&self, key: usize) -> Option<usize> {
        self.elems[key].parent
    }

    fn child_count(&self, key: usize) -> usize {
        self.elems[key].children.len()
    }

    fn child(&self, key: usize, index: usize) -> Option<usize> {
        self.elems[key].children.get(index).copied()
    }

    fn style(&self, key: usize) -> &ElementStyle {
        &self.elems[key].style
    }

    fn style_mut(&mut self, key: usize) -> &mut ElementStyle {
        &mut self.elems[key].style
    }

    fn element_definition(&mut self, key: usize) -> Option<Definition> {
        let style = &self.elems[key].style;
        let matched: Vec<RuleNode> = self
            .rules
            .iter()
            .filter(|(class, _)| style.is_class_set(class))
            .map(|(_, node)| node.clone())
            .collect();
        self.cache
            .get_or_build(&matched, &PseudoClassSet::new(), false, &NoEffects)
    }
}

fn colour(r: u8) -> Property {
    Property::colour(Rgba8 {
        r,
        g: 0,
        b: 0,
        a: 255,
    })
}

fn rules(count: u32) -> Vec<(&'static str, RuleNode)> {
    (0..count)
        .map(|i| {
            let class = if i % 2 == 0 { "even" } else { "odd" };
            let node = RuleNode::new(RuleId(i), Specificity(0, 1, i))
                .with_property(PropertyId::Color, colour(u8::try_from(i).unwrap_or(u8::MAX)))
                .with_property(PropertyId::Opacity, Property::number(0.5))
                .with_pseudo_classes(if i % 3 == 0 {
                    PseudoClassSet::from_names(["hover"])
                } else {
                    PseudoClassSet::new()
                });
            (class, node)
        })
        .collect()
}

/// A computed tree with alternating `even` and `odd` elements.
fn styled_tree(cx: &StyleCx<'_>, depth: u32, fanout: usize) -> Tree {
    let mut tree = Tree::new(depth, fanout, rules(8));
    for key in 0..tree.elems.len() {
        let class = if key % 2 == 0 { "even" } else { "odd" };
        cx.set_class(&mut tree, key, class, true);
    }
    cx.update_subtree(&mut tree, 0, 1.0);
    tree
}

fn bench_cascade(c: &mut Criterion) {
    let registry = PropertyRegistry::with_defaults();
    let cx = StyleCx::new(&registry);

    let mut group = c.benchmark_group("style/definition");
    for &count in &[4_u32, 32] {
        let nodes: Vec<RuleNode> = rules(count).into_iter().map(|(_, node)| node).collect();
        group.bench_function(BenchmarkId::new("build", count), |b| {
            b.iter(|| {
                black_box(Definition::new(
                    &nodes,
                    &PseudoClassSet::new(),
                    false,
                    &NoEffects,
                ))
            })
        });

        let definition = Definition::new(&nodes, &PseudoClassSet::new(), false, &NoEffects);
        let hovered = [String::from("hover")];
        group.bench_function(BenchmarkId::new("get_property", count), |b| {
            b.iter(|| black_box(definition.get_property(PropertyId::Color, &hovered)))
        });
        group.bench_function(BenchmarkId::new("iter", count), |b| {
            b.iter(|| black_box(definition.iter(&hovered).count()))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("style/tree");
    group.sample_size(50);

    // A 16-deep chain, for ancestor fallback.
    let mut chain = Tree::new(16, 1, Vec::new());
    chain.elems[0]
        .style
        .set_property(&registry, PropertyId::FontFamily, Property::string("serif"))
        .unwrap();
    let leaf = chain.elems.len() - 1;
    group.bench_function("get_property/inherited", |b| {
        b.iter(|| black_box(cx.get_property(&chain, leaf, PropertyId::FontFamily)))
    });

    for &(depth, fanout) in &[(3_u32, 4_usize), (5_u32, 4_usize)] {
        let mut tree = styled_tree(&cx, depth, fanout);
        let size = tree.elems.len();

        group.bench_function(BenchmarkId::new("restyle_after_root_class", size), |b| {
            b.iter_batched(
                || {
                    let mut tree = styled_tree(&cx, depth, fanout);
                    cx.set_class(&mut tree, 0, "odd", true);
                    tree
                },
                |mut tree| black_box(cx.update_subtree(&mut tree, 0, 1.0)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(BenchmarkId::new("hover_toggle", size), |b| {
            b.iter(|| {
                cx.set_pseudo_class(&mut tree, 1, "hover", true);
                cx.set_pseudo_class(&mut tree, 1, "hover", false);
                black_box(cx.update_subtree(&mut tree, 0, 1.0))
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("dirty_set");
    group.bench_function("mark_take", |b| {
        b.iter_batched(
            DirtySet::<PropertyId>::new,
            |mut dirty| {
                dirty.mark_many(PropertyId::ALL.iter().copied().step_by(3));
                black_box(dirty.take())
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_cascade);
criterion_main!(benches);
