use std::collections::HashSet;

use ffgraph::FilterGraph;

/// Initialize tracing for tests with appropriate settings
#[inline]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Panics unless every label a filter consumes was produced by an earlier
/// filter, and no label is produced twice.
pub fn assert_dependency_order(graph: &FilterGraph) {
    let mut produced = HashSet::new();
    for (position, filter) in graph.filters().iter().enumerate() {
        for input in filter.inputs() {
            if input.starts_with(ffgraph::LABEL_PREFIX) {
                assert!(
                    produced.contains(input),
                    "filter #{} ({}) consumes {} before it is produced",
                    position,
                    filter,
                    input
                );
            }
        }
        for output in filter.outputs() {
            assert!(produced.insert(output.clone()), "label {} produced twice", output);
        }
    }
    assert_eq!(produced.len(), graph.label_count());
}
