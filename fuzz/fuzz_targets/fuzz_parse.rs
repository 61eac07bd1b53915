#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Any input either fails with StructureNotFound or yields a tree
    // whose projections terminate
    if let Ok(catalog) = pipview::parse(data) {
        let mut state = pipview::view::ViewState::new();
        state.expand_all(catalog.store());
        let visible = pipview::view::project(catalog.store(), &state.expanded);
        assert!(visible.len() <= catalog.store().len());
    }
});
