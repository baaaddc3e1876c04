#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Loading must either succeed or fail with an error, never panic
    let Ok(mut mztab) = mztab_edit::MzTab::parse(text) else {
        return;
    };

    // A loaded document may still fail to serialize (dangling references),
    // but whatever it writes must load again
    if let Ok(out) = mztab.to_mztab_string() {
        let reloaded = mztab_edit::MzTab::parse(&out);
        assert!(reloaded.is_ok(), "saved document failed to load: {:?}", reloaded.err());
    }

    let keys: Vec<String> = mztab.attribute_keys().into_iter().map(String::from).collect();
    if let Some(key) = keys.first() {
        let _ = mztab.render_slices(key);
        let values: Vec<String> = mztab.slice_values(key).into_iter().map(String::from).collect();
        let _ = mztab.delete(key, &values[..1]);
        let _ = mztab.to_mztab_string();
    }
});
