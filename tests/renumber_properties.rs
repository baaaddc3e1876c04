//! Property tests for renumbering and editing
//!
//! Documents are generated with sparse, shuffled identifiers; saving must
//! renumber densely, keep every abundance column bound to the same sample,
//! and be a fixed point on its own output.

use std::collections::BTreeSet;

use mztab_edit::MzTab;
use proptest::prelude::*;

/// One generated sample: its old identifier number and its group
#[derive(Debug, Clone)]
struct GeneratedSample {
    number: u32,
    group: char,
}

fn samples() -> impl Strategy<Value = Vec<GeneratedSample>> {
    prop::collection::btree_set(1u32..500, 1..12)
        .prop_flat_map(|numbers: BTreeSet<u32>| {
            let numbers: Vec<u32> = numbers.into_iter().collect();
            let len = numbers.len();
            (
                Just(numbers).prop_shuffle(),
                prop::collection::vec(prop::sample::select(vec!['A', 'B', 'C']), len),
            )
        })
        .prop_map(|(numbers, groups)| {
            numbers
                .into_iter()
                .zip(groups)
                .map(|(number, group)| GeneratedSample { number, group })
                .collect()
        })
}

/// Sample `n` is measured by assay `n + 1000` on run `n * 2`, and its
/// abundance in the single summary row is `n`.
fn document(generated: &[GeneratedSample]) -> String {
    let mut text = String::from("MTD\tmzTab-version\t2.0.0-M\n");
    for entry in generated {
        let n = entry.number;
        text.push_str(&format!("MTD\tsample[{n}]\tS{n}\n"));
        text.push_str(&format!(
            "MTD\tsample[{n}]-description\tgroup:{} | origin:{n}\n",
            entry.group
        ));
    }
    for entry in generated {
        let n = entry.number;
        text.push_str(&format!("MTD\tms_run[{}]-location\tfile:///run{n}.mzML\n", n * 2));
    }
    for entry in generated {
        let n = entry.number;
        text.push_str(&format!("MTD\tassay[{}]-sample_ref\tsample[{n}]\n", n + 1000));
        text.push_str(&format!("MTD\tassay[{}]-ms_run_ref\tms_run[{}]\n", n + 1000, n * 2));
    }
    text.push_str("SMH\tSML_ID");
    for entry in generated {
        text.push_str(&format!("\tabundance_assay[{}]", entry.number + 1000));
    }
    text.push_str("\nSML\t1");
    for entry in generated {
        text.push_str(&format!("\t{}", entry.number));
    }
    text.push('\n');
    text
}

/// Every assay's abundance equals the `origin` attribute of its sample
fn assert_bound(mztab: &MzTab) -> Result<(), TestCaseError> {
    for assay in mztab.assays() {
        let sample = assay
            .sample_ref
            .and_then(|id| mztab.sample(id))
            .ok_or_else(|| TestCaseError::fail(format!("{} has no sample", assay.id)))?;
        let column = format!("abundance_assay[{}]", assay.id.number());
        prop_assert_eq!(mztab.summary().value(0, &column), sample.attribute("origin"));
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_save_is_fixed_point(generated in samples()) {
        let once = MzTab::parse(&document(&generated)).unwrap().to_mztab_string().unwrap();
        let twice = MzTab::parse(&once).unwrap().to_mztab_string().unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_roundtrip_is_dense_and_bound(generated in samples()) {
        let out = MzTab::parse(&document(&generated)).unwrap().to_mztab_string().unwrap();
        let reloaded = MzTab::parse(&out).unwrap();

        prop_assert_eq!(reloaded.samples().len(), generated.len());
        prop_assert_eq!(reloaded.assays().len(), generated.len());
        prop_assert_eq!(reloaded.runs().len(), generated.len());

        let mut numbers: Vec<u32> = reloaded.samples().iter().map(|s| s.id.number()).collect();
        numbers.sort_unstable();
        prop_assert_eq!(numbers, (1..=generated.len() as u32).collect::<Vec<_>>());
        assert_bound(&reloaded)?;
    }

    #[test]
    fn test_delete_closure(generated in samples(), group in prop::sample::select(vec!['A', 'B', 'C'])) {
        let mut mztab = MzTab::parse(&document(&generated)).unwrap();
        let group = group.to_string();
        mztab.delete("group", &[group.as_str()]).unwrap();

        let out = mztab.to_mztab_string().unwrap();
        let reloaded = MzTab::parse(&out).unwrap();
        let survivors = generated.iter().filter(|s| s.group.to_string() != group).count();

        prop_assert_eq!(reloaded.samples().len(), survivors);
        prop_assert_eq!(reloaded.summary().abundance_columns().len(), survivors);
        prop_assert!(reloaded.samples().iter().all(|s| s.attribute("group") != Some(group.as_str())));
        assert_bound(&reloaded)?;
    }

    #[test]
    fn test_slices_partition(generated in samples()) {
        let mztab = MzTab::parse(&document(&generated)).unwrap();
        let slices = mztab.render_slices("group").unwrap();

        let groups: BTreeSet<char> = generated.iter().map(|s| s.group).collect();
        prop_assert_eq!(slices.len(), groups.len());
        prop_assert_eq!(slices.iter().map(|s| s.sample_count).sum::<usize>(), generated.len());

        for slice in &slices {
            let part = MzTab::parse(&slice.text).unwrap();
            let expected = generated.iter().filter(|s| s.group.to_string() == slice.value).count();
            prop_assert_eq!(part.samples().len(), expected);
            prop_assert!(part.samples().iter().all(|s| s.attribute("group") == Some(slice.value.as_str())));
            assert_bound(&part)?;
        }
    }
}
