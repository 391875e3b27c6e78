use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use seqforge::genomics::{count_kmers, count_kmers_canonical, kmer_distance};
use seqforge::{Aligner, AlignerConfig, AlignmentMode, ScoringMatrix, Sequence};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seqforge", version, about = "Nucleotide sequence analysis and pairwise alignment")]
struct Cli {
    /// Emit debug-level logs (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// +2 / -1 / gap -2
    Default,
    /// +1 / -3 / gap -5
    Blast,
}

#[derive(clap::Args, Debug)]
struct ScoringArgs {
    /// Named scoring preset.
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    preset: Preset,
    /// Match reward (overrides the preset together with --mismatch and --gap).
    #[arg(long = "match", requires_all = ["mismatch", "gap"])]
    match_score: Option<i32>,
    /// Mismatch penalty.
    #[arg(long, allow_negative_numbers = true)]
    mismatch: Option<i32>,
    /// Linear gap penalty.
    #[arg(long, allow_negative_numbers = true)]
    gap: Option<i32>,
}

impl ScoringArgs {
    fn scoring(&self) -> Result<ScoringMatrix> {
        match (self.match_score, self.mismatch, self.gap) {
            (Some(m), Some(mm), Some(gap)) => {
                ScoringMatrix::linear(m, mm, gap).context("invalid scoring parameters")
            }
            (None, None, None) => Ok(match self.preset {
                Preset::Default => ScoringMatrix::default_dna(),
                Preset::Blast => ScoringMatrix::blast_like(),
            }),
            _ => bail!("--match, --mismatch and --gap must be given together"),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align two DNA sequences.
    Align {
        /// First sequence.
        seq1: String,
        /// Second sequence.
        seq2: String,
        /// Global (Needleman-Wunsch) instead of local alignment.
        #[arg(long)]
        global: bool,
        /// Print only the score, using the two-row pass in local mode.
        #[arg(long)]
        score_only: bool,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
    /// Count k-mers in a DNA sequence.
    Kmers {
        /// Sequence to index.
        sequence: String,
        /// K-mer length.
        #[arg(short, default_value_t = 3)]
        k: usize,
        /// Number of k-mers to report.
        #[arg(long, default_value_t = 10)]
        top: usize,
        /// Merge each k-mer with its reverse complement.
        #[arg(long)]
        canonical: bool,
    },
    /// Jaccard k-mer distance between two DNA sequences.
    Distance {
        /// First sequence.
        seq1: String,
        /// Second sequence.
        seq2: String,
        /// K-mer length.
        #[arg(short, default_value_t = 3)]
        k: usize,
    },
    /// Find the target that aligns best to a query.
    Best {
        /// Query sequence.
        query: String,
        /// Target sequences.
        #[arg(required = true)]
        targets: Vec<String>,
        #[command(flatten)]
        scoring: ScoringArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Align {
            seq1,
            seq2,
            global,
            score_only,
            scoring,
        } => run_align(&seq1, &seq2, global, score_only, &scoring)?,
        Commands::Kmers {
            sequence,
            k,
            top,
            canonical,
        } => run_kmers(&sequence, k, top, canonical)?,
        Commands::Distance { seq1, seq2, k } => run_distance(&seq1, &seq2, k)?,
        Commands::Best {
            query,
            targets,
            scoring,
        } => run_best(&query, &targets, &scoring)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_dna(text: &str, label: &str) -> Result<Sequence> {
    Sequence::dna(text).with_context(|| format!("invalid {label} sequence"))
}

fn run_align(
    seq1: &str,
    seq2: &str,
    global: bool,
    score_only: bool,
    scoring: &ScoringArgs,
) -> Result<()> {
    let a = parse_dna(seq1, "first")?;
    let b = parse_dna(seq2, "second")?;
    let mode = if global {
        AlignmentMode::Global
    } else {
        AlignmentMode::Local
    };
    let config = AlignerConfig::new(mode).with_scoring(scoring.scoring()?);
    let mut aligner = Aligner::new(config);

    if score_only {
        let score = aligner.score(&a, &b).context("alignment failed")?;
        println!("{score}");
    } else {
        let alignment = aligner.align(&a, &b).context("alignment failed")?;
        print!("{alignment}");
    }
    Ok(())
}

fn run_kmers(sequence: &str, k: usize, top: usize, canonical: bool) -> Result<()> {
    let seq = parse_dna(sequence, "input")?;
    let counter = if canonical {
        count_kmers_canonical(&seq, k)
    } else {
        count_kmers(&seq, k)
    }
    .context("k-mer counting failed")?;

    println!(
        "k={}\ttotal={}\tdistinct={}\tentropy={:.3}",
        counter.k(),
        counter.total(),
        counter.unique_count(),
        counter.entropy()
    );
    for (kmer, count) in counter.most_frequent(top) {
        println!("{kmer}\t{count}");
    }
    Ok(())
}

fn run_distance(seq1: &str, seq2: &str, k: usize) -> Result<()> {
    let a = parse_dna(seq1, "first")?;
    let b = parse_dna(seq2, "second")?;
    let distance = kmer_distance(&a, &b, k).context("k-mer distance failed")?;
    println!("{distance:.4}");
    Ok(())
}

fn run_best(query: &str, targets: &[String], scoring: &ScoringArgs) -> Result<()> {
    let query = parse_dna(query, "query")?;
    let targets = targets
        .iter()
        .enumerate()
        .map(|(idx, text)| parse_dna(text, &format!("target {}", idx + 1)))
        .collect::<Result<Vec<_>>>()?;

    let mut aligner = Aligner::new(AlignerConfig::local().with_scoring(scoring.scoring()?));
    let (index, alignment) = aligner
        .find_best_alignment(&query, &targets)
        .context("multi-target alignment failed")?;

    println!("best target: {} ({})", index + 1, targets[index]);
    print!("{alignment}");
    Ok(())
}
