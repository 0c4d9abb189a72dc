use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tabletop_interaction::GrabPolicy;

#[derive(Parser, Debug)]
#[command(
    about = "Replays recorded hand traces through the tabletop interaction core",
    version
)]
pub struct Args {
    /// Optional JSON interaction config (layout, oracle thresholds, palette)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hand trace JSON to replay
    #[arg(long, conflicts_with = "demo")]
    pub trace: Option<PathBuf>,

    /// Replay the built-in grab/sit/stand demo trace
    #[arg(long)]
    pub demo: bool,

    /// Override the grab tie-break policy from the config
    #[arg(long, value_enum)]
    pub grab_policy: Option<GrabPolicyArg>,

    /// Path to write one JSON sample per replayed frame
    #[arg(long)]
    pub frame_log_json: Option<PathBuf>,

    /// Path to write the interaction event log as JSON
    #[arg(long)]
    pub event_log_json: Option<PathBuf>,

    /// Print a summary line for every frame, not only frames with events
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GrabPolicyArg {
    Exclusive,
    LastWriterWins,
}

impl From<GrabPolicyArg> for GrabPolicy {
    fn from(value: GrabPolicyArg) -> Self {
        match value {
            GrabPolicyArg::Exclusive => GrabPolicy::Exclusive,
            GrabPolicyArg::LastWriterWins => GrabPolicy::LastWriterWins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceSource {
    File(PathBuf),
    Demo,
}

#[derive(Debug)]
pub struct ReplayArgs {
    pub config: Option<PathBuf>,
    pub source: TraceSource,
    pub grab_policy: Option<GrabPolicy>,
    pub frame_log_json: Option<PathBuf>,
    pub event_log_json: Option<PathBuf>,
    pub verbose: bool,
}

pub fn parse() -> Result<ReplayArgs> {
    Args::parse().into_replay()
}

impl Args {
    fn into_replay(self) -> Result<ReplayArgs> {
        let source = match (self.trace, self.demo) {
            (Some(_), true) => bail!("--trace cannot be combined with --demo"),
            (Some(path), false) => TraceSource::File(path),
            (None, true) => TraceSource::Demo,
            (None, false) => bail!("either --trace <PATH> or --demo is required"),
        };

        Ok(ReplayArgs {
            config: self.config,
            source,
            grab_policy: self.grab_policy.map(GrabPolicy::from),
            frame_log_json: self.frame_log_json,
            event_log_json: self.event_log_json,
            verbose: self.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> Result<ReplayArgs> {
        let mut argv = vec!["tabletop_engine"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv)?.into_replay()
    }

    #[test]
    fn demo_flag_selects_builtin_trace() {
        let args = parse_from(&["--demo", "--verbose"]).expect("parse");
        assert_eq!(args.source, TraceSource::Demo);
        assert!(args.verbose);
        assert_eq!(args.grab_policy, None);
    }

    #[test]
    fn trace_and_policy_override() {
        let args = parse_from(&["--trace", "hands.json", "--grab-policy", "last-writer-wins"])
            .expect("parse");
        assert_eq!(args.source, TraceSource::File(PathBuf::from("hands.json")));
        assert_eq!(args.grab_policy, Some(GrabPolicy::LastWriterWins));
    }

    #[test]
    fn missing_source_is_rejected() {
        let err = parse_from(&[]).expect_err("no source");
        assert!(err.to_string().contains("--demo"));
    }

    #[test]
    fn trace_conflicts_with_demo() {
        assert!(parse_from(&["--trace", "hands.json", "--demo"]).is_err());
    }
}
