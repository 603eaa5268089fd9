use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mx_results::app::services::results_parser::ResultsParser;

const RIDERS: &[(&str, &str, &str)] = &[
    ("Jett Lawrence", "Landsborough, Australia", "Honda CRF450R"),
    ("Justin Cooper", "Cairo, NY", "Yamaha YZ450F"),
    ("Chase Sexton", "La Moille, IL", "KTM 450 SX-F Factory Edition"),
    ("Aaron M. Plessinger", "Hamilton, OH", "KTM 450 SX-F"),
    ("Justin Barcia Jr.", "Monroe, NY", "GasGas MC 450F"),
    ("Ken Roczen", "Mattstedt", "Suzuki RM-Z450"),
];

/// A sheet with `rows` result lines, a page break every 20 rows and
/// a split row every 7
fn synthetic_sheet(rows: usize) -> String {
    let mut sheet = String::from(
        "2024 Pro Motocross Championship\n\
         Hangtown Motocross Classic - Rancho Cordova, CA\n\
         ROUND 1 - May 18, 2024\n\
         450 Class\n\
         Moto 1 Results\n\
         POS # RIDER HOMETOWN BIKE LAPS GAP\n",
    );

    for position in 1..=rows {
        let (name, hometown, bike) = RIDERS[position % RIDERS.len()];
        let separator = if position % 7 == 0 { "\n" } else { " " };
        sheet.push_str(&format!(
            "{}{}{} {} {} {} 17 +{}.{:03}\n",
            position,
            separator,
            position % 999 + 1,
            name,
            hometown,
            bike,
            position,
            position * 37 % 1000
        ));
        if position % 20 == 0 {
            sheet.push_str("Page break\nPOS # RIDER HOMETOWN BIKE LAPS GAP\n");
        }
    }
    sheet
}

fn bench_parse_text(c: &mut Criterion) {
    let parser = ResultsParser::new();
    let mut group = c.benchmark_group("parse_text");

    for rows in [40usize, 400, 4000] {
        let sheet = synthetic_sheet(rows);
        group.throughput(Throughput::Bytes(sheet.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &sheet, |b, sheet| {
            b.iter(|| parser.parse_text(black_box(sheet), "bench.txt"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse_text);
criterion_main!(benches);
