use diskweight_layout::{
    DeletionOutcome, LayoutConfig, Node, NodeId, SessionError, SunburstLayout, ViewSession,
    locate, node_stats, path_to, project, prune, prune_resized,
};
use std::sync::Arc;

const EPSILON: f64 = 1e-9;

/// Root of 5000 bytes with three sized children and one empty one.
fn sized_root() -> Arc<Node> {
    Node::new_directory("root", "root", 5000)
        .with_children([
            Node::new_file("s", "small", 100),
            Node::new_file("l", "large", 3000),
            Node::new_file("e", "empty", 0),
            Node::new_file("m", "medium", 500),
        ])
        .into_shared()
}

/// Deterministic tree where every directory's size is the sum of its children.
///
/// Returns the root and all ids with their depth, in pre-order.
fn generated_tree(fanout: usize, depth: usize) -> (Arc<Node>, Vec<(NodeId, usize)>) {
    fn build(
        prefix: String,
        level: usize,
        fanout: usize,
        depth: usize,
        ids: &mut Vec<(NodeId, usize)>,
    ) -> Node {
        ids.push((NodeId::new(prefix.as_str()), level));
        if level == depth {
            let size = (prefix.len() as u64 * 37) % 97 + 1;
            return Node::new_file(prefix.as_str(), format!("file-{prefix}"), size);
        }

        let children: Vec<Node> = (0..fanout)
            .map(|i| build(format!("{prefix}.{i}"), level + 1, fanout, depth, ids))
            .collect();
        let size = children.iter().map(|c| c.size).sum();
        Node::new_directory(prefix.as_str(), format!("dir-{prefix}"), size).with_children(children)
    }

    let mut ids = Vec::new();
    let root = build("r".to_string(), 0, fanout, depth, &mut ids);
    (root.into_shared(), ids)
}

// ----- Aggregator -----

#[test]
fn test_stats_files_and_one_subdirectory() {
    let root = Node::new_directory("1", "root", 400).with_children([
        Node::new_file("2", "a.txt", 100),
        Node::new_file("3", "b.txt", 100),
        Node::new_directory("4", "sub", 100).with_children([Node::new_file("5", "c.txt", 100)]),
        Node::new_file("6", "d.txt", 100),
    ]);

    let stats = node_stats(Some(&root));
    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.total_directories, 1);
    assert_eq!(stats.total_size, 400);
}

#[test]
fn test_stats_three_files_one_subdirectory() {
    let root = Node::new_directory("1", "root", 40).with_children([
        Node::new_file("2", "a", 10),
        Node::new_file("3", "b", 10),
        Node::new_directory("4", "sub", 20).with_children([Node::new_file("5", "c", 20)]),
    ]);

    let stats = node_stats(Some(&root));
    // Two direct files plus the one inside the subdirectory.
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.total_directories, 1);
}

#[test]
fn test_stats_additivity_on_generated_tree() {
    let (root, ids) = generated_tree(3, 4);
    let stats = node_stats(Some(&root));

    assert_eq!(stats.descendants(), ids.len() as u64 - 1);
    assert_eq!(stats.total_files, 3u64.pow(4));
    assert_eq!(stats.total_size, root.size);
}

#[test]
fn test_stats_flat_tree_has_no_directories() {
    let root = Node::new_directory("1", "root", 3).with_children([
        Node::new_file("2", "a", 1),
        Node::new_file("3", "b", 1),
        Node::new_file("4", "c", 1),
    ]);
    let stats = node_stats(Some(&root));
    assert_eq!(stats.total_directories, 0);
    assert_eq!(stats.total_files, 3);
}

#[test]
fn test_stats_empty_directories_are_counted() {
    let root = Node::new_directory("1", "root", 0).with_children([
        Node::new_directory("2", "empty-a", 0),
        Node::new_directory("3", "empty-b", 0),
    ]);
    let stats = node_stats(Some(&root));
    assert_eq!(stats.total_directories, 2);
    assert_eq!(stats.total_files, 0);
}

// ----- Locator and breadcrumbs -----

#[test]
fn test_locate_every_id() {
    let (root, ids) = generated_tree(3, 3);
    for (id, _) in &ids {
        let found = locate(Some(&root), id).expect("id present in tree");
        assert_eq!(&found.id, id);
    }
    assert!(locate(Some(&root), &NodeId::new("missing")).is_none());
}

#[test]
fn test_path_to_every_id() {
    let (root, ids) = generated_tree(2, 5);
    for (id, depth) in &ids {
        let path = path_to(Some(&root), id);
        assert_eq!(path.len(), depth + 1);
        assert!(Arc::ptr_eq(&path[0], &root));
        assert_eq!(&path.last().unwrap().id, id);

        // Each step is a child of the previous one.
        for pair in path.windows(2) {
            assert!(pair[0].children.iter().any(|c| Arc::ptr_eq(c, &pair[1])));
        }
    }
}

#[test]
fn test_path_to_missing_or_no_root() {
    let root = sized_root();
    assert!(path_to(Some(&root), &NodeId::new("missing")).is_empty());
    assert!(path_to(None, &NodeId::new("root")).is_empty());

    let path = path_to(Some(&root), &NodeId::new("root"));
    assert_eq!(path.len(), 1);
}

#[test]
fn test_locate_handles_very_deep_trees() {
    let depth = 100_000;
    let mut node = Node::new_file("leaf", "leaf", 1);
    for i in (0..depth).rev() {
        node = Node::new_directory(format!("d{i}"), "d", 1).with_children([node]);
    }
    let root = node.into_shared();

    let found = locate(Some(&root), &NodeId::new("leaf")).unwrap();
    assert_eq!(found.name, "leaf");
    assert_eq!(path_to(Some(&root), &NodeId::new("leaf")).len(), depth + 1);
    assert_eq!(node_stats(Some(&root)).total_directories, depth as u64 - 1);

    // Unwind iteratively so dropping the chain does not recurse.
    let mut next = Arc::try_unwrap(root).ok();
    while let Some(mut current) = next {
        next = current
            .children
            .pop()
            .and_then(|child| Arc::try_unwrap(child).ok());
    }
}

// ----- Pruner -----

#[test]
fn test_prune_leaf_keeps_siblings_by_reference() {
    let keep = Node::new_file("2", "keep.txt", 10).into_shared();
    let remove = Node::new_file("3", "remove.txt", 20).into_shared();
    let also_keep = Node::new_file("4", "alsoKeep.txt", 30).into_shared();
    let root = Arc::new(Node {
        children: vec![Arc::clone(&keep), remove, Arc::clone(&also_keep)],
        ..Node::new_directory("1", "root", 60)
    });

    let pruned = prune(&root, &NodeId::new("3"));

    assert!(!Arc::ptr_eq(&pruned, &root));
    assert_eq!(pruned.child_count(), 2);
    assert!(Arc::ptr_eq(&pruned.children[0], &keep));
    assert!(Arc::ptr_eq(&pruned.children[1], &also_keep));

    // Original is intact.
    assert_eq!(root.child_count(), 3);
}

#[test]
fn test_prune_shares_every_subtree_off_the_spine() {
    let (root, ids) = generated_tree(3, 3);

    for (target, depth) in ids.iter().filter(|(_, depth)| *depth > 0) {
        let pruned = prune(&root, target);
        let spine: Vec<NodeId> = path_to(Some(&root), target)
            .iter()
            .map(|n| n.id.clone())
            .collect();

        assert!(locate(Some(&pruned), target).is_none());
        assert_eq!(node_stats(Some(&pruned)).total_size, root.size);

        // Walk both trees along the spine; every sibling must be shared.
        let mut old = Arc::clone(&root);
        let mut new = Arc::clone(&pruned);
        for step in 1..*depth {
            let next_id = &spine[step];
            for (old_child, new_child) in old
                .children
                .iter()
                .filter(|c| c.id != *next_id)
                .zip(new.children.iter().filter(|c| c.id != *next_id))
            {
                assert!(Arc::ptr_eq(old_child, new_child));
            }
            old = locate(Some(&old), next_id).unwrap();
            new = locate(Some(&new), next_id).unwrap();
        }

        // Remaining children of the removed node's parent are shared too.
        let survivors: Vec<&Arc<Node>> = old.children.iter().filter(|c| c.id != *target).collect();
        assert_eq!(survivors.len(), new.child_count());
        for (old_child, new_child) in survivors.into_iter().zip(&new.children) {
            assert!(Arc::ptr_eq(old_child, new_child));
        }
    }
}

#[test]
fn test_prune_nested_directory() {
    let (root, _) = generated_tree(2, 3);
    let target = NodeId::new("r.1.0");

    let pruned = prune(&root, &target);
    assert!(Arc::ptr_eq(&pruned.children[0], &root.children[0]));
    assert_eq!(pruned.children[1].child_count(), 1);
    assert_eq!(pruned.children[1].children[0].id, NodeId::new("r.1.1"));
    assert!(Arc::ptr_eq(
        &pruned.children[1].children[0],
        &root.children[1].children[1]
    ));
    // Stale sizes are kept.
    assert_eq!(pruned.children[1].size, root.children[1].size);
}

#[test]
fn test_prune_resized_keeps_sum_invariant() {
    let (root, ids) = generated_tree(3, 3);

    for (target, depth) in ids.iter().filter(|(_, depth)| *depth > 0) {
        let removed = locate(Some(&root), target).unwrap().size;
        let pruned = prune_resized(&root, target);
        assert_eq!(pruned.size, root.size - removed, "target {target} at depth {depth}");

        let mut pending = vec![Arc::clone(&pruned)];
        while let Some(node) = pending.pop() {
            if node.has_children() {
                let sum: u64 = node.children.iter().map(|c| c.size).sum();
                assert_eq!(node.size, sum);
            }
            pending.extend(node.children.iter().cloned());
        }
    }
}

// ----- Rectangle view -----

#[test]
fn test_project_sized_root() {
    let root = sized_root();
    let view = project(Some(&root), 20);

    let names: Vec<&str> = view.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["large", "medium", "small"]);
    assert_eq!(view.max_item_size, 3000);
    assert_eq!(view.total_size, 5000);

    for item in &view.items {
        assert!(Arc::ptr_eq(&item.node, locate(Some(&root), item.id()).as_ref().unwrap()));
    }
}

#[test]
fn test_project_truncates_and_keeps_total() {
    let children: Vec<Node> = (0..30u64)
        .map(|i| Node::new_file(format!("f{i}"), format!("file{i}"), i))
        .collect();
    let total: u64 = children.iter().map(|c| c.size).sum();
    let root = Node::new_directory("root", "root", total).with_children(children);

    let view = project(Some(&root), 20);
    assert_eq!(view.items.len(), 20);
    assert_eq!(view.max_item_size, 29);
    assert_eq!(view.total_size, total);
    assert!(view.items.windows(2).all(|w| w[0].size >= w[1].size));
    assert!(view.items.iter().all(|i| i.size > 0));
    assert_eq!(view.items.last().unwrap().size, 10);

    let shown: u64 = view.items.iter().map(|i| i.size).sum();
    assert!(shown < view.total_size);
}

#[test]
fn test_projection_serializes_without_subtrees() {
    let root = sized_root();
    let value = serde_json::to_value(project(Some(&root), 2)).unwrap();

    assert_eq!(value["total_size"], 5000);
    assert_eq!(value["max_item_size"], 3000);
    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "large");
    assert!(items[0].get("node").is_none());
}

#[test]
fn test_project_only_empty_children() {
    let root = Node::new_directory("root", "root", 0).with_children([
        Node::new_file("a", "a", 0),
        Node::new_file("b", "b", 0),
    ]);
    let view = project(Some(&root), 20);
    assert!(view.items.is_empty());
    assert_eq!(view.max_item_size, 0);
}

// ----- Radial layout -----

#[test]
fn test_sunburst_sized_root() {
    let root = sized_root();
    let segments = SunburstLayout::default().layout_root(&root).unwrap();

    assert_eq!(segments.len(), 4);
    assert!(segments.iter().all(|s| s.node.name != "empty"));

    let root_segment = &segments[0];
    assert_eq!(root_segment.level, 0);
    assert_eq!(root_segment.start_angle, 0.0);
    assert_eq!(root_segment.end_angle, 360.0);

    let expected = [("large", 0.0, 216.0), ("medium", 216.0, 252.0), ("small", 252.0, 259.2)];
    for (segment, (name, start, end)) in segments[1..].iter().zip(expected) {
        assert_eq!(segment.node.name, name);
        assert!((segment.start_angle - start).abs() < EPSILON, "{name} start");
        assert!((segment.end_angle - end).abs() < EPSILON, "{name} end");
        assert_eq!(segment.level, 1);
        assert_eq!(segment.inner_radius, root_segment.outer_radius);
    }
}

#[test]
fn test_sunburst_children_tile_parent_span() {
    let (root, _) = generated_tree(4, 3);
    let layout = SunburstLayout::default();
    let segments = layout.layout(&root, 30.0, 300.0, 50.0, 107.5, 0).unwrap();

    for (index, parent) in segments.iter().enumerate() {
        let children: Vec<_> = segments[index + 1..]
            .iter()
            .take_while(|s| s.level > parent.level)
            .filter(|s| s.level == parent.level + 1)
            .collect();
        if children.is_empty() {
            continue;
        }

        assert_eq!(children[0].start_angle, parent.start_angle);
        for pair in children.windows(2) {
            // Running accumulation: no gap, no overlap.
            assert_eq!(pair[1].start_angle, pair[0].end_angle);
            assert!(pair[0].node.size >= pair[1].node.size);
        }
        let covered: f64 = children.iter().map(|c| c.sweep()).sum();
        assert!((covered - parent.sweep()).abs() < 1e-6);
        assert!((children.last().unwrap().end_angle - parent.end_angle).abs() < 1e-6);
    }
}

#[test]
fn test_sunburst_pre_order_output() {
    let root = Node::new_directory("r", "r", 10)
        .with_children([
            Node::new_file("small", "small", 2),
            Node::new_directory("big", "big", 8).with_children([
                Node::new_file("x", "x", 3),
                Node::new_file("y", "y", 5),
            ]),
        ])
        .into_shared();

    let segments = SunburstLayout::default().layout_root(&root).unwrap();
    let order: Vec<&str> = segments.iter().map(|s| s.node.id.as_str()).collect();
    assert_eq!(order, vec!["r", "big", "y", "x", "small"]);
}

#[test]
fn test_sunburst_emits_sub_degree_segments() {
    let root = Node::new_directory("r", "r", 1_000_000)
        .with_children([
            Node::new_file("huge", "huge", 999_999),
            Node::new_file("tiny", "tiny", 1),
        ])
        .into_shared();

    let segments = SunburstLayout::default().layout_root(&root).unwrap();
    let tiny = segments.iter().find(|s| s.node.id.as_str() == "tiny").unwrap();
    assert!(tiny.sweep() > 0.0 && tiny.sweep() < 1.0);
}

#[test]
fn test_sunburst_respects_configured_max_level() {
    let (root, _) = generated_tree(2, 6);
    let config = LayoutConfig::builder().max_level(2u32).build().unwrap();
    let layout = SunburstLayout::from(&config);

    let segments = layout.layout_root(&root).unwrap();
    assert_eq!(segments.iter().map(|s| s.level).max(), Some(3));
    // 1 + 2 + 4 + 8 nodes across levels 0..=3.
    assert_eq!(segments.len(), 15);
    assert_eq!(layout.band_width(), 115.0);
    assert!(segments.iter().all(|s| s.outer_radius <= 280.0));
}

// ----- Session -----

fn session_tree() -> Arc<Node> {
    Node::new_directory("root", "root", 100)
        .with_children([
            Node::new_directory("docs", "docs", 70).with_children([
                Node::new_directory("old", "old", 50)
                    .with_children([Node::new_file("log", "big.log", 50)]),
                Node::new_file("readme", "README", 20),
            ]),
            Node::new_file("bin", "app", 30),
        ])
        .into_shared()
}

#[test]
fn test_session_drill_and_back() {
    let mut session = ViewSession::new(session_tree());

    session.drill_into(&NodeId::new("old")).unwrap();
    let names: Vec<&str> = session.breadcrumbs().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["root", "docs", "old"]);
    assert_eq!(session.current().id, NodeId::new("old"));
    assert_eq!(session.stats().total_files, 1);

    assert!(session.drill_up());
    assert_eq!(session.current().id, NodeId::new("docs"));

    session.jump_to(0).unwrap();
    assert_eq!(session.depth(), 0);
    assert!(!session.drill_up());

    assert!(matches!(
        session.jump_to(3),
        Err(SessionError::BreadcrumbOutOfRange { index: 3, depth: 0 })
    ));
}

#[test]
fn test_session_deleting_viewed_node_falls_back_to_parent() {
    let mut session = ViewSession::new(session_tree());
    session.drill_into(&NodeId::new("old")).unwrap();

    session
        .apply_deletion(&NodeId::new("old"), DeletionOutcome::Deleted)
        .unwrap();

    assert_eq!(session.current().id, NodeId::new("docs"));
    assert_eq!(session.current().child_count(), 1);
    assert!(Arc::ptr_eq(&session.breadcrumbs()[0], session.root()));
    assert!(locate(Some(session.root()), &NodeId::new("log")).is_none());
}

#[test]
fn test_session_deleting_elsewhere_keeps_view() {
    let original = session_tree();
    let mut session = ViewSession::new(Arc::clone(&original));
    session.drill_into(&NodeId::new("docs")).unwrap();

    session
        .apply_deletion(&NodeId::new("bin"), DeletionOutcome::Deleted)
        .unwrap();

    assert_eq!(session.current().id, NodeId::new("docs"));
    assert_eq!(session.root().child_count(), 1);
    // The viewed subtree was off the spine and is still the same allocation.
    assert!(Arc::ptr_eq(session.current(), &original.children[0]));
}

#[test]
fn test_session_resizes_when_configured() {
    let config = LayoutConfig::builder().resize_on_prune(true).build().unwrap();
    let mut session = ViewSession::with_config(session_tree(), config);
    session.drill_into(&NodeId::new("docs")).unwrap();

    session
        .apply_deletion(&NodeId::new("readme"), DeletionOutcome::Deleted)
        .unwrap();

    assert_eq!(session.root().size, 80);
    assert_eq!(session.current().size, 50);
    assert_eq!(session.treemap().total_size, 50);
}

#[test]
fn test_session_views_follow_current_node() {
    let mut session = ViewSession::new(session_tree());
    session.drill_into(&NodeId::new("docs")).unwrap();

    let view = session.treemap();
    let names: Vec<&str> = view.items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["old", "README"]);

    let segments = session.sunburst().unwrap();
    assert_eq!(segments[0].node.id, NodeId::new("docs"));
    assert_eq!(segments.len(), 4);
}
