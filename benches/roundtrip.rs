use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mztab_edit::MzTab;

/// Generate a study with `num_samples` samples, one assay and run each,
/// and `num_rows` summary rows
fn generate_study(num_samples: usize, num_rows: usize) -> String {
    let mut text = String::from("MTD\tmzTab-version\t2.0.0-M\nMTD\tmzTab-ID\tbench\n");

    for i in 1..=num_samples {
        let group = if i % 2 == 0 { "A" } else { "B" };
        text.push_str(&format!("MTD\tsample[{i}]\tS{i}\n"));
        text.push_str(&format!(
            "MTD\tsample[{i}]-description\tpatientid:P{} | group:{group}\n",
            i % 8
        ));
        text.push_str(&format!("MTD\tms_run[{i}]-location\tfile:///data/run{i}.mzML\n"));
        text.push_str(&format!("MTD\tassay[{i}]\tA{i}\n"));
        text.push_str(&format!("MTD\tassay[{i}]-sample_ref\tsample[{i}]\n"));
        text.push_str(&format!("MTD\tassay[{i}]-ms_run_ref\tms_run[{i}]\n"));
    }

    text.push_str("SMH\tSML_ID\tdatabase_identifier");
    for i in 1..=num_samples {
        text.push_str(&format!("\tabundance_assay[{i}]"));
    }
    text.push('\n');

    for row in 1..=num_rows {
        text.push_str(&format!("SML\t{row}\tHMDB:{row:07}"));
        for i in 1..=num_samples {
            if (row + i) % 7 == 0 {
                text.push_str("\tnull");
            } else {
                text.push_str(&format!("\t{}.5", row * i));
            }
        }
        text.push('\n');
    }
    text
}

/// Benchmark load followed by save with no edits
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for (num_samples, num_rows) in [(8, 1_000), (32, 5_000), (96, 10_000)] {
        let text = generate_study(num_samples, num_rows);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}samples_{}rows", num_samples, num_rows)),
            &text,
            |b, text| {
                b.iter(|| {
                    let mztab = MzTab::parse(black_box(text)).unwrap();
                    black_box(mztab.to_mztab_string().unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark deleting half the samples and saving
fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_group");

    let text = generate_study(64, 5_000);
    let mztab = MzTab::parse(&text).unwrap();

    group.bench_function("delete_and_save", |b| {
        b.iter(|| {
            let mut edited = mztab.clone();
            edited.delete("group", &["B"]).unwrap();
            black_box(edited.to_mztab_string().unwrap());
        });
    });

    group.finish();
}

/// Benchmark rendering one slice per patient
fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("slices");

    let text = generate_study(64, 5_000);
    let mztab = MzTab::parse(&text).unwrap();

    group.bench_function("render_by_patient", |b| {
        b.iter(|| {
            let slices = mztab.render_slices(black_box("patientid")).unwrap();
            black_box(slices);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_roundtrip, bench_delete, bench_slices);
criterion_main!(benches);
