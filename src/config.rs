use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_INPUT: &str = "raw_data.csv";
const DEFAULT_OUTPUT: &str = "risk_analysis.csv";

/// Where the batch runner reads from and writes to.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub json: Option<PathBuf>,
    pub xlsx: Option<PathBuf>,
    pub quiet: bool,
}

impl RunConfig {
    /// Flags win over environment variables, which win over defaults under `XPTS_DATA_DIR`.
    pub fn resolve(args: &[String]) -> Self {
        Self::resolve_with(args, |key| env::var(key).ok())
    }

    pub fn resolve_with(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let from_env = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        let data_dir = from_env("XPTS_DATA_DIR").unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let input = parse_path_arg(args, "input")
            .or_else(|| from_env("XPTS_INPUT"))
            .unwrap_or_else(|| data_dir.join(DEFAULT_INPUT));
        let output = parse_path_arg(args, "output")
            .or_else(|| from_env("XPTS_OUTPUT"))
            .unwrap_or_else(|| data_dir.join(DEFAULT_OUTPUT));
        let json = parse_path_arg(args, "json").or_else(|| from_env("XPTS_JSON"));
        let xlsx = parse_path_arg(args, "xlsx").or_else(|| from_env("XPTS_XLSX"));
        let quiet = args.iter().any(|a| a == "--quiet" || a == "-q");

        Self {
            input,
            output,
            json,
            xlsx,
            quiet,
        }
    }
}

/// Accepts `--name=value` and `--name value`; in the second form `value` may not start with `-`.
fn parse_path_arg(args: &[String], name: &str) -> Option<PathBuf> {
    let long = format!("--{name}");
    let prefixed = format!("--{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefixed) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if *arg == long {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            // A following flag means the value was left out.
            if !next.trim().is_empty() && !next.starts_with('-') {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_live_under_data_dir() {
        let cfg = RunConfig::resolve_with(&[], |_| None);
        assert_eq!(cfg.input, PathBuf::from("data/raw_data.csv"));
        assert_eq!(cfg.output, PathBuf::from("data/risk_analysis.csv"));
        assert!(cfg.json.is_none());
        assert!(cfg.xlsx.is_none());
        assert!(!cfg.quiet);
    }

    #[test]
    fn env_overrides_defaults_and_flags_override_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("XPTS_DATA_DIR", "/srv/league"),
            ("XPTS_INPUT", "/tmp/in.csv"),
            ("XPTS_XLSX", "  "),
        ]);
        let lookup = |k: &str| env.get(k).map(|v| v.to_string());

        let cfg = RunConfig::resolve_with(&[], lookup);
        assert_eq!(cfg.input, PathBuf::from("/tmp/in.csv"));
        assert_eq!(cfg.output, PathBuf::from("/srv/league/risk_analysis.csv"));
        assert!(cfg.xlsx.is_none());

        let cfg = RunConfig::resolve_with(
            &args(&["--input=/data/a.csv", "--json", "out.json", "-q"]),
            lookup,
        );
        assert_eq!(cfg.input, PathBuf::from("/data/a.csv"));
        assert_eq!(cfg.json, Some(PathBuf::from("out.json")));
        assert!(cfg.quiet);
    }

    #[test]
    fn flag_value_is_never_another_flag() {
        let cfg = RunConfig::resolve_with(&args(&["--input", "--quiet"]), |_| None);
        assert_eq!(cfg.input, PathBuf::from("data/raw_data.csv"));
        assert!(cfg.quiet);

        let cfg = RunConfig::resolve_with(&args(&["--xlsx", "-q", "--json", "r.json"]), |_| None);
        assert!(cfg.xlsx.is_none());
        assert_eq!(cfg.json, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn dangling_flag_is_ignored() {
        let cfg = RunConfig::resolve_with(&args(&["--output"]), |_| None);
        assert_eq!(cfg.output, PathBuf::from("data/risk_analysis.csv"));
    }
}
