// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// alifilter - Machine-learning alignment column filtering
pub struct Args {
    /// path to the alignment file (relaxed PHYLIP or aligned FASTA)
    #[argh(option)]
    pub alignment: Option<String>,

    /// path to the JSON model file (default: keep-everything model)
    #[argh(option)]
    pub model: Option<String>,

    /// alignment format: auto, phylip, fasta (default: auto)
    #[argh(option, default = "String::from(\"auto\")")]
    pub format: String,

    /// override the model threshold (0.0-1.0)
    #[argh(option)]
    pub threshold: Option<f64>,

    /// output mask file (default: print the mask to stdout)
    #[argh(option)]
    pub output: Option<String>,

    /// write per-column features to this TSV file
    #[argh(option)]
    pub features_out: Option<String>,

    /// write per-column scores to this TSV file
    #[argh(option)]
    pub scores_out: Option<String>,

    /// write the filtered alignment to this file
    #[argh(option)]
    pub filtered_out: Option<String>,

    /// filtered alignment format: auto, phylip, fasta (default: auto)
    #[argh(option, default = "String::from(\"auto\")")]
    pub output_format: String,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without computation (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
