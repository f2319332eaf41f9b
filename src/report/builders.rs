//! Report builders
//!
//! Each builder is a pure composition of selector output into a fixed
//! row / column layout. Missing datasets or families produce 0.0 cells.

use tracing::info;

use super::{Cell, CompositeTable, Table};
use crate::config::ReportConfig;
use crate::dataset::{DatasetStats, InteractionStats};
use crate::selection::{num_components_eq, select_best_test_any, select_best_test};
use crate::trial::{DatasetResultSet, ModelClass};

/// Caption of the component-count table.
pub const HYPERPARAMETER_CAPTION: &str = "Effect of number of mixture components";

/// Cross-reference label of the component-count table.
pub const HYPERPARAMETER_LABEL: &str = "tab:nummixtures";

fn header_row(first: &str, config: &ReportConfig) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(config.datasets().iter().map(|d| d.label().to_string()))
        .collect()
}

const fn results_for<'a>(
    class: ModelClass,
    sequence: &'a DatasetResultSet,
    factorization: &'a DatasetResultSet,
) -> &'a DatasetResultSet {
    match class {
        ModelClass::Sequence => sequence,
        ModelClass::Factorization => factorization,
    }
}

/// Best test MRR per model and dataset, one sub-table per model class.
///
/// Rows follow [`ModelClass::models`]; columns follow the configured
/// datasets.
#[must_use]
pub fn performance_table(
    sequence: &DatasetResultSet,
    factorization: &DatasetResultSet,
    config: &ReportConfig,
) -> CompositeTable {
    let tables = ModelClass::ALL
        .into_iter()
        .map(|class| {
            let results = results_for(class, sequence, factorization);
            let mut table = Table::new(header_row("Model", config)).with_caption(class.caption());

            for model in class.models() {
                let row = std::iter::once(Cell::from(model.label))
                    .chain(config.datasets().iter().map(|dataset| {
                        Cell::Float(select_best_test_any(
                            results.collection(dataset.key()),
                            model.family,
                        ))
                    }))
                    .collect();
                table.push_row(row);
            }

            table
        })
        .collect();

    CompositeTable::new(tables)
}

/// Best test MRR of each class's mixture family per component count.
///
/// Rows are the configured component counts; a count without trials
/// yields 0.0 cells.
#[must_use]
pub fn hyperparameter_table(
    sequence: &DatasetResultSet,
    factorization: &DatasetResultSet,
    config: &ReportConfig,
) -> CompositeTable {
    let tables = ModelClass::ALL
        .into_iter()
        .map(|class| {
            let results = results_for(class, sequence, factorization);
            let family = class.mixture_family();
            let mut table =
                Table::new(header_row("Components", config)).with_caption(class.caption());

            for &components in config.component_counts() {
                let row = std::iter::once(Cell::from(components))
                    .chain(config.datasets().iter().map(|dataset| {
                        Cell::Float(select_best_test(
                            results.collection(dataset.key()),
                            family,
                            num_components_eq(components),
                        ))
                    }))
                    .collect();
                table.push_row(row);
            }

            table
        })
        .collect();

    CompositeTable::new(tables)
        .with_caption(HYPERPARAMETER_CAPTION)
        .with_label(HYPERPARAMETER_LABEL)
}

/// Users, items, density and 95th/50th skew ratio per dataset.
#[must_use]
pub fn dataset_table(datasets: &[(&str, &dyn InteractionStats)]) -> Table {
    let mut table = Table::new(["Dataset", "Users", "Items", "Density", "95th/50th"]);

    for &(name, dataset) in datasets {
        let stats = DatasetStats::compute(dataset);
        info!(dataset = name, ratio = stats.skew_ratio, "dataset skew");

        table.push_row(vec![
            Cell::from(name),
            Cell::Text(group_thousands(stats.num_users)),
            Cell::Text(group_thousands(stats.num_items)),
            Cell::Float(stats.density),
            Cell::Text(format!("{:.2}", stats.skew_ratio)),
        ]);
    }

    table
}

/// Format an integer with comma thousands separators (`69878` -> `69,878`).
#[must_use]
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Interactions;
    use crate::trial::{Hyperparameters, ModelFamily, TrialCollection, TrialRecord};

    fn results(dataset: &str, trials: Vec<TrialRecord>) -> DatasetResultSet {
        let mut set = DatasetResultSet::new();
        set.insert(dataset, TrialCollection::new(trials));
        set
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(10_677), "10,677");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_performance_layout() {
        let table = performance_table(
            &DatasetResultSet::new(),
            &DatasetResultSet::new(),
            &ReportConfig::default(),
        );

        assert_eq!(table.tables().len(), 2);
        let sequence = &table.tables()[0];
        assert_eq!(sequence.caption(), Some("Sequence models"));
        assert_eq!(
            sequence.headers(),
            ["Model", "Movielens 10M", "Amazon", "Goodbooks"]
        );
        assert_eq!(sequence.rows().len(), 2);
        assert_eq!(table.tables()[1].rows().len(), 3);
        assert_eq!(sequence.cell(1, "Amazon"), Some(&Cell::Float(0.0)));
    }

    #[test]
    fn test_performance_cells() {
        let sequence = results(
            "amazon",
            vec![
                TrialRecord::new(Hyperparameters::new(ModelFamily::Lstm), 0.2, 0.07),
                TrialRecord::new(Hyperparameters::new(ModelFamily::Mixture), 0.3, 0.09),
            ],
        );
        let factorization = results(
            "goodbooks",
            vec![TrialRecord::new(Hyperparameters::new(ModelFamily::Mixture), 0.3, 0.11)],
        );

        let table = performance_table(&sequence, &factorization, &ReportConfig::default());
        let seq = &table.tables()[0];
        let fact = &table.tables()[1];

        assert_eq!(seq.cell(0, "Amazon"), Some(&Cell::Float(0.07)));
        assert_eq!(seq.cell(1, "Amazon"), Some(&Cell::Float(0.09)));
        assert_eq!(seq.cell(1, "Goodbooks"), Some(&Cell::Float(0.0)));
        // Projection Mixture row
        assert_eq!(fact.cell(1, "Goodbooks"), Some(&Cell::Float(0.11)));
    }

    #[test]
    fn test_hyperparameter_rows() {
        let hyper = |n| {
            Hyperparameters::builder(ModelFamily::EmbeddingMixture)
                .num_components(n)
                .build()
        };
        let factorization = results(
            "10M",
            vec![
                TrialRecord::new(hyper(4), 0.1, 0.21),
                TrialRecord::new(hyper(4), 0.2, 0.22),
                TrialRecord::new(hyper(8), 0.1, 0.23),
            ],
        );

        let table =
            hyperparameter_table(&DatasetResultSet::new(), &factorization, &ReportConfig::default());
        assert_eq!(table.caption(), Some(HYPERPARAMETER_CAPTION));
        assert_eq!(table.label(), Some(HYPERPARAMETER_LABEL));

        let fact = &table.tables()[1];
        assert_eq!(fact.headers()[0], "Components");
        let first_column: Vec<_> = fact.rows().iter().map(|row| row[0].clone()).collect();
        assert_eq!(first_column, [2, 4, 6, 8].map(Cell::Integer).to_vec());
        assert_eq!(fact.cell(0, "Movielens 10M"), Some(&Cell::Float(0.0)));
        assert_eq!(fact.cell(1, "Movielens 10M"), Some(&Cell::Float(0.22)));
        assert_eq!(fact.cell(3, "Movielens 10M"), Some(&Cell::Float(0.23)));
    }

    #[test]
    fn test_dataset_table_row() {
        let interactions = Interactions::new(vec![0, 1, 1], vec![0, 0, 1]).unwrap();
        let stats: &dyn InteractionStats = &interactions;
        let table = dataset_table(&[("Tiny", stats)]);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.cell(0, "Users"), Some(&Cell::Text("2".to_string())));
        assert_eq!(table.cell(0, "Density"), Some(&Cell::Float(0.75)));
        // counts [1, 2]: p95 = 1.95, p50 = 1.5
        assert_eq!(table.cell(0, "95th/50th"), Some(&Cell::Text("1.30".to_string())));
    }
}
