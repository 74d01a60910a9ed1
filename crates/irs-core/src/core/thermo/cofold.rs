use super::model::ThermoModel;
use super::oracle::{BindingOracle, OracleError};
use crate::core::sequence::RnaSequence;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_COFOLD_BIN: &str = "RNAcofold";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Delegates to the ViennaRNA `RNAcofold` executable in partition-function mode and reports
/// the ensemble free energy of the dimer.
#[derive(Debug, Clone)]
pub struct CofoldOracle {
    executable: PathBuf,
    timeout: Option<Duration>,
}

impl Default for CofoldOracle {
    fn default() -> Self {
        Self::new(DEFAULT_COFOLD_BIN)
    }
}

impl CofoldOracle {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeout: None,
        }
    }

    /// Kills the child process when a single invocation runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn executable(&self) -> &PathBuf {
        &self.executable
    }

    fn args(model: &ThermoModel) -> Vec<String> {
        vec![
            "-p".to_string(),
            "--noPS".to_string(),
            "-T".to_string(),
            format!("{:.2}", model.temperature_celsius()),
        ]
    }

    fn run(&self, input: &str, args: &[String]) -> Result<String, OracleError> {
        let exe = self.executable.display().to_string();
        let mut child = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => OracleError::EngineUnavailable {
                    engine: exe.clone(),
                    message: "executable not found; install ViennaRNA or set `oracle.rnacofold-bin`"
                        .to_string(),
                },
                _ => OracleError::EngineUnavailable {
                    engine: exe.clone(),
                    message: e.to_string(),
                },
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| OracleError::EngineFailed {
                    engine: exe.clone(),
                    message: format!("failed to write input: {}", e),
                })?;
        }

        if let Some(limit) = self.timeout {
            Self::wait_until(&mut child, limit, &exe)?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| OracleError::EngineFailed {
                engine: exe.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(OracleError::EngineFailed {
                engine: exe,
                message: format!(
                    "exit status {:?}: {}",
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Polls `child` until it exits; past `limit` it is killed and reaped.
    fn wait_until(child: &mut Child, limit: Duration, exe: &str) -> Result<(), OracleError> {
        let deadline = Instant::now() + limit;
        loop {
            let status = child.try_wait().map_err(|e| OracleError::EngineFailed {
                engine: exe.to_string(),
                message: e.to_string(),
            })?;
            if status.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!(
                    executable = exe,
                    seconds = limit.as_secs_f64(),
                    "Killing cofold engine after timeout."
                );
                // Kill fails only if the process already exited.
                let _ = child.kill();
                let _ = child.wait();
                return Err(OracleError::Timeout {
                    seconds: limit.as_secs_f64(),
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Extracts the ensemble free energy from the bracketed `[ -12.34]` structure line.
pub fn parse_ensemble_energy(stdout: &str) -> Option<f64> {
    stdout.lines().find_map(|line| {
        let line = line.trim_end();
        if !line.ends_with(']') {
            return None;
        }
        let open = line.rfind('[')?;
        line[open + 1..line.len() - 1].trim().parse::<f64>().ok()
    })
}

impl BindingOracle for CofoldOracle {
    fn name(&self) -> &str {
        "rnacofold"
    }

    fn binding_free_energy(
        &self,
        strand_a: &RnaSequence,
        strand_b: &RnaSequence,
        model: &ThermoModel,
    ) -> Result<f64, OracleError> {
        if strand_a.is_empty() || strand_b.is_empty() {
            return Err(OracleError::InvalidInput("both strands must be non-empty".to_string()));
        }
        let input = format!("{}&{}\n", strand_a, strand_b);
        let args = Self::args(model);
        debug!(executable = %self.executable.display(), ?args, "Invoking cofold engine.");

        let stdout = self.run(&input, &args)?;
        let energy = parse_ensemble_energy(&stdout).ok_or_else(|| OracleError::Parse {
            engine: self.executable.display().to_string(),
            output: stdout.clone(),
        })?;
        if !energy.is_finite() {
            return Err(OracleError::NonFinite(energy));
        }
        Ok(energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_OUTPUT: &str = "\
GGGAAACCC&GGGUUUCCC
((((...((&))...)))) (-10.90)
((((...{(&)}...)))) [-11.42]
((((...((&))...)))) {-10.90 d=1.23}
 frequency of mfe structure in ensemble 0.43; delta G binding= -7.20
";

    #[test]
    fn parses_bracketed_ensemble_energy() {
        assert_eq!(parse_ensemble_energy(SAMPLE_OUTPUT), Some(-11.42));
    }

    #[test]
    fn parse_returns_none_without_ensemble_line() {
        assert_eq!(parse_ensemble_energy("ACGU&ACGU\n.... (0.00)\n"), None);
    }

    #[test]
    fn missing_executable_is_reported_as_unavailable() {
        let oracle = CofoldOracle::new("/nonexistent/path/to/RNAcofold-missing");
        let a: RnaSequence = "GGGAAA".parse().unwrap();
        let b: RnaSequence = "UUUCCC".parse().unwrap();
        let result = oracle.binding_free_energy(&a, &b, &ThermoModel::rna(37.0).unwrap());
        assert!(matches!(result, Err(OracleError::EngineUnavailable { .. })));
    }

    #[cfg(unix)]
    fn fake_engine(dir: &std::path::Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-cofold.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn reads_energy_from_engine_output() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_engine(dir.path(), "cat > /dev/null\necho '((((&)))) [-3.50]'");
        let oracle = CofoldOracle::new(exe).with_timeout(Some(Duration::from_secs(10)));
        let a: RnaSequence = "GGGAAA".parse().unwrap();
        let b: RnaSequence = "UUUCCC".parse().unwrap();
        let energy = oracle
            .binding_free_energy(&a, &b, &ThermoModel::rna(37.0).unwrap())
            .unwrap();
        assert_eq!(energy, -3.50);
    }

    #[cfg(unix)]
    #[test]
    fn hung_engine_is_killed_at_the_deadline() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_engine(dir.path(), "exec sleep 30");
        let oracle = CofoldOracle::new(exe).with_timeout(Some(Duration::from_millis(100)));
        let a: RnaSequence = "GGGAAA".parse().unwrap();
        let b: RnaSequence = "UUUCCC".parse().unwrap();

        let started = Instant::now();
        let result = oracle.binding_free_energy(&a, &b, &ThermoModel::rna(37.0).unwrap());

        assert!(matches!(result, Err(OracleError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn temperature_is_forwarded_to_the_engine() {
        let args = CofoldOracle::args(&ThermoModel::rna(31.0).unwrap());
        assert_eq!(args, vec!["-p", "--noPS", "-T", "31.00"]);
    }
}
