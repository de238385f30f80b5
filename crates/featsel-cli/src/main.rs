// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! featsel: sequential wrapper feature selection with a k-NN objective
//!
//! Usage:
//!     featsel SFFS wine.arff 5
//!     featsel SBS train.arff test.arff 4 --stop-on features
//!
//! `STOP` is the number of consecutive non-improving iterations tolerated, or
//! the maximum number of selected features with `--stop-on features`.

use anyhow::Context;
use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind};
use featsel_knn::knn::{DEFAULT_K, KnnObjective};
use featsel_model::{
    dataset::Dataset,
    index::FeatureIndex,
    loading::DatasetLoader,
    preprocessing::MinMaxScaler,
    split::{DEFAULT_SPLIT_SEED, DataSplit, SplitRatios},
    subset::FeatureSubset,
};
use featsel_search::{
    criteria::StoppingCriteria, monitor::log::LogMonitor, objective::ObjectiveFunction,
};
use featsel_seq::{
    algorithm::SelectionAlgorithm, config::SelectionConfig, engine::SequentialSelectionEngine,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StopOn {
    /// Stop after STOP iterations without improvement.
    Progress,
    /// Report at most STOP features.
    Features,
}

#[derive(Parser, Debug)]
#[command(
    name = "featsel",
    version,
    about = "Select the features that maximise k-NN accuracy"
)]
struct Args {
    /// Search strategy: SFS, SBS, SFFS or SFBS
    algorithm: SelectionAlgorithm,

    /// Training data (ARFF, or CSV with a .csv extension)
    dataset: PathBuf,

    /// Optional testing data, followed by the stopping value
    #[arg(value_name = "[TESTING] STOP", num_args = 1..=2, required = true)]
    rest: Vec<String>,

    /// What the stopping value bounds
    #[arg(long, value_enum, default_value_t = StopOn::Progress)]
    stop_on: StopOn,

    /// Zero-based column of the class label (default: last)
    #[arg(long)]
    class_index: Option<usize>,

    /// Drop a feature column before the search (repeatable)
    #[arg(long = "drop-attribute", value_name = "INDEX")]
    drop_attributes: Vec<usize>,

    /// Number of neighbours
    #[arg(short, default_value_t = DEFAULT_K)]
    k: usize,

    /// Shuffle seed for the train/validation/test split
    #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
    seed: u64,

    /// Min-max normalise features using the training split
    #[arg(long)]
    normalize: bool,

    /// Log per-iteration details
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Splits the trailing positionals into the testing path and `STOP`.
    fn testing_and_stop(&self) -> (Option<PathBuf>, usize) {
        let (testing, stop) = match self.rest.as_slice() {
            [stop] => (None, stop),
            [testing, stop] => (Some(PathBuf::from(testing)), stop),
            _ => Args::command()
                .error(ErrorKind::WrongNumberOfValues, "expected [TESTING] STOP")
                .exit(),
        };

        let stop = stop.parse::<usize>().unwrap_or_else(|e| {
            Args::command()
                .error(
                    ErrorKind::ValueValidation,
                    format!("invalid STOP value '{stop}': {e}"),
                )
                .exit()
        });

        (testing, stop)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "featsel=debug" } else { "featsel=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(loader: &DatasetLoader, path: &Path, drop: &[usize]) -> anyhow::Result<Dataset> {
    let mut dataset = loader
        .from_path(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    // Highest index first so earlier removals do not shift later ones.
    let mut drop = drop.to_vec();
    drop.sort_unstable_by(|a, b| b.cmp(a));
    drop.dedup();
    for index in drop {
        dataset
            .remove_attribute(FeatureIndex::new(index))
            .with_context(|| format!("cannot drop attribute {index} from {}", path.display()))?;
    }

    Ok(dataset)
}

fn feature_names(dataset: &Dataset, subset: &FeatureSubset) -> String {
    subset
        .iter()
        .map(|f| match dataset.feature_name(f) {
            Some(name) => format!("{name} ({})", f.get()),
            None => f.get().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (testing_path, stop) = args.testing_and_stop();
    init_tracing(args.verbose);

    let mut loader = DatasetLoader::new();
    if let Some(index) = args.class_index {
        loader = loader.with_class_index(index);
    }

    let dataset = load(&loader, &args.dataset, &args.drop_attributes)?;
    let mut split = match testing_path {
        Some(path) => {
            let testing = load(&loader, &path, &args.drop_attributes)?;
            DataSplit::from_pair(&dataset, testing, SplitRatios::WITH_TESTING_FILE, args.seed)
                .context("training and testing data do not match")?
        }
        None => DataSplit::from_single(&dataset, SplitRatios::SINGLE_FILE, args.seed),
    };

    if args.normalize {
        let scaler = MinMaxScaler::fit(split.training());
        let (training, validation, testing) = split.parts_mut();
        for part in [training, validation, testing] {
            scaler.transform(part);
        }
    }

    tracing::info!(
        training = split.training().num_instances(),
        validation = split.validation().num_instances(),
        testing = split.testing().num_instances(),
        features = split.training().num_features(),
        "prepared data"
    );

    let config = match args.stop_on {
        StopOn::Progress => SelectionConfig::builder(args.algorithm)
            .criteria(StoppingCriteria::convergence(stop))
            .build()
            .context("invalid stopping budget")?,
        StopOn::Features => SelectionConfig::at_most(args.algorithm, stop),
    };

    let knn = KnnObjective::new(&split)
        .with_k(args.k)
        .context("invalid number of neighbours")?;

    let outcome = SequentialSelectionEngine::new(config)
        .select_with_monitor(&knn, LogMonitor::<f64>::new())
        .with_context(|| format!("{} selection failed", args.algorithm))?;

    let selected = outcome.selected_features();
    println!("{outcome}");
    println!(
        "selected {} of {} features: {}",
        selected.len(),
        split.training().num_features(),
        feature_names(split.training(), &selected)
    );

    if split.testing().is_empty() {
        tracing::warn!("testing split is empty, skipping accuracy comparison");
        return Ok(());
    }

    let all = knn.all_feature_indices();
    let all_accuracy = knn
        .test_accuracy(&all)
        .context("failed to score the testing split")?;
    let selected_accuracy = knn
        .test_accuracy(&selected)
        .context("failed to score the testing split")?;

    println!("testing accuracy with all features: {all_accuracy:.2}%");
    println!("testing accuracy with selected features: {selected_accuracy:.2}%");

    Ok(())
}
