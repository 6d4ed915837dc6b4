#![no_main]
use libfuzzer_sys::fuzz_target;
use license_gate::config::DependencyConfig;
use license_gate::model::DependencyGraph;
use license_gate::resolve::load_dependency_coordinates;

/// Fuzz graph loading and traversal.
///
/// Dangling edges, duplicate ids and unknown component kinds must all be
/// reported as errors; cycles must terminate.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(graph) = DependencyGraph::from_json(s) {
            let _ = load_dependency_coordinates(&graph, &DependencyConfig::default());
        }
    }
});
