//! パフォーマンスベンチマーク
//!
//! このモジュールは、xlsxspecクレートのパフォーマンスを測定するためのベンチマークを提供します。
//!
//! 実装するベンチマーク:
//! - 行データからの変換（逐次処理と並列処理の比較）
//! - 整形器の有無による比較
//! - XLSXワークブックからの変換（読み込みを含む）
//!
//! 入力はすべて実行時に生成するため、フィクスチャファイルは不要です。

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;
use xlsxspec::ConverterBuilder;

/// 1つのSKUの行（2タブ、US/UKの値、折りたたみセクション、お手入れ情報）
fn sku_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec!["1", "Frame"],
        vec!["", "Material", "Aluminum", "", "Material", "Aluminium"],
        vec!["", "Weight", "2.5 kg\n5.5 lb", "", "Weight", "2.5 kg"],
        vec!["", "Dimensions", "", "", "Dimensions"],
        vec!["Start", "Part", "Width", "Height", "Part", "Width", "Height"],
        vec!["", "Pole", "10", "20", "Pole", "25", "50"],
        vec!["End", "Base", "30", "5", "Base", "75", "12"],
        vec!["2", "Canopy"],
        vec!["", "Fabric", "Polyester", "", "Fabric", "Polyester"],
        vec!["", "Note:", "Colors may vary", "", "Note:", "Colours may vary"],
        vec!["", "Washing Instructions", "Hand wash", "", "Washing Instructions", "Hand wash"],
        vec!["", "", "Do not bleach", "", "", "Do not bleach"],
    ]
}

/// `sku_count`個のSKUを持つ行データを生成
fn generate_rows(sku_count: usize) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(sku_count * 13);
    for index in 0..sku_count {
        rows.push(vec![format!("SKU-{:05}", index)]);
        for row in sku_rows() {
            rows.push(row.iter().map(|cell| cell.to_string()).collect());
        }
    }
    rows
}

/// 行データをXLSXワークブックとして書き出す
fn generate_workbook(rows: &[Vec<String>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, value.as_str())
                    .unwrap();
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// 行データからの変換: 逐次処理と並列処理
fn benchmark_convert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_rows");

    for sku_count in [10usize, 100, 1000] {
        let rows = generate_rows(sku_count);
        group.throughput(Throughput::Elements(sku_count as u64));

        for parallel in [false, true] {
            let converter = ConverterBuilder::new()
                .with_parallel(parallel)
                .build()
                .unwrap();
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(BenchmarkId::new(label, sku_count), &rows, |b, rows| {
                b.iter(|| black_box(converter.convert_rows(black_box(rows)).unwrap()));
            });
        }
    }

    group.finish();
}

/// 整形器の有無による比較
fn benchmark_pretty_print(c: &mut Criterion) {
    let rows = generate_rows(100);

    let mut group = c.benchmark_group("pretty_print");
    group.throughput(Throughput::Elements(100));

    for pretty in [false, true] {
        let converter = ConverterBuilder::new()
            .with_pretty_print(pretty)
            .with_parallel(false)
            .build()
            .unwrap();
        let label = if pretty { "beautified" } else { "raw" };

        group.bench_function(label, |b| {
            b.iter(|| black_box(converter.convert_rows(black_box(&rows)).unwrap()));
        });
    }

    group.finish();
}

/// XLSXワークブックからの変換
fn benchmark_workbook(c: &mut Criterion) {
    let data = generate_workbook(&generate_rows(500));
    let converter = ConverterBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("workbook");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10); // 10回のサンプルで平均を取る

    group.bench_function("convert_500_skus", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            black_box(converter.convert(input).unwrap())
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(10))
        .warm_up_time(std::time::Duration::from_secs(3));
    targets = benchmark_convert_rows, benchmark_pretty_print, benchmark_workbook
}

criterion_main!(benches);
