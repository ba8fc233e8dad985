//! Configuration types for noisegate.
//!
//! [`Config::load`] reads `~/.config/noisegate/config.toml`, creating it
//! with the built-in defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests), and [`Config::load_from`] reads an explicit path for the CLI's
//! `--config` flag.
//!
//! The built-in allow-lists and known problems cover the recurring noise a
//! conformance run is expected to produce: probe failures the suites cause
//! on purpose, image-pull and init-container back-offs, scheduler retries
//! against tainted nodes, and a handful of tracked platform bugs.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[evaluator]
# An event only counts as duplicated once its coalesced repeat count
# exceeds this value.
repeat_threshold = 20

# Repeated events excused unconditionally, whatever their count.
allowed_patterns = [
    # Readiness probes the e2e suites fail on purpose.
    'ns/e2e-statefulset-[0-9]+ pod/ss-[0-9] node/[a-z0-9.-]+ - reason/Unhealthy Readiness probe failed: ',
    'ns/e2e-port-forwarding-[0-9]+ pod/pfpod node/[a-z0-9.-]+ - reason/Unhealthy Readiness probe failed:',
    'ns/e2e-container-probe-[0-9]+ .* - reason/Unhealthy Readiness probe failed: ',
    # Init containers and bad image references back off until the suite is done.
    'ns/e2e-init-container-[0-9]+ pod/pod-init-[a-z0-9-]+ node/[a-z0-9.-]+ - reason/BackOff Back-off restarting failed container',
    'ns/e2e-deployment-[0-9]+ pod/webserver-deployment-[a-z0-9-]+ node/[a-z0-9.-]+ - reason/BackOff Back-off pulling image',
    # The scheduler retries pods that can only land on tainted or mismatched nodes.
    'ns/e2e-test-scc-[a-z0-9]+ pod/.* - reason/FailedScheduling .*nodes are available.*had taint.*the pod didn.t tolerate',
    'ns/e2e-persistent-local-volumes-test-[0-9]+ pod/pod-[a-z0-9-]+ reason/FailedScheduling .*nodes are available.*node affinity conflict',
    # Pods that violate the non-root policy fail on every restart attempt.
    'ns/e2e-security-context-test-[0-9]+ pod/explicit-root-uid node/[a-z0-9.-]+ - reason/Failed Error: container.s runAsUser breaks non-root policy',
    # Default vSphere UPI installs run hardware version 13; the detector
    # re-marks the cluster un-upgradeable on every sync.
    'ns/openshift-cluster-storage-operator deployment/vsphere-problem-detector-operator - reason/VSphereOlderVersionDetected Marking cluster un-upgradeable because one or more VMs are on hardware version vmx-13',
]

# Additionally excused while an upgrade is in flight.
upgrade_allowed_patterns = [
    # Etcd members drop in and out while the operator rolls the cluster.
    'ns/openshift-etcd-operator deployment/etcd-operator - reason/UnhealthyEtcdMember unhealthy members: [a-z0-9.,-]+',
    'ns/openshift-etcd pod/etcd-quorum-guard-[a-z0-9-]+ node/[a-z0-9.-]+ - reason/Unhealthy Readiness probe failed: ',
]

# Tracked bugs: matching events are reported but do not fail the check.
[[evaluator.known_problems]]
pattern = 'ns/openshift-multus pod/network-metrics-daemon-[a-z0-9]+ node/[a-z0-9.-]+ - reason/NetworkNotReady network is not ready: container runtime network not ready: NetworkReady=false reason:NetworkPluginNotReady message:Network plugin returns error: No CNI configuration file in /etc/kubernetes/cni/net.d/. Has your network provider started\?'
reference = 'https://bugzilla.redhat.com/show_bug.cgi?id=1986370'

[[evaluator.known_problems]]
pattern = 'ns/openshift-e2e-loki pod/loki-promtail-[a-z0-9]+ node/[a-z0-9.-]+ - reason/NetworkNotReady network is not ready'
reference = 'https://bugzilla.redhat.com/show_bug.cgi?id=1986370'

[[evaluator.known_problems]]
pattern = 'ns/openshift-etcd-operator namespace/openshift-etcd-operator -.*rpc error: code = Canceled desc = grpc: the client connection is closing'
reference = 'https://bugzilla.redhat.com/show_bug.cgi?id=2006975'
topology = 'SingleReplica'
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/noisegate/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

/// `[evaluator]` section of `config.toml`.
///
/// The pattern lists are regex source strings; they compile when an
/// evaluator is constructed from this config, and an unparsable pattern is
/// fatal at that point.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorConfig {
    /// Repeat counts must exceed this value before an event is considered
    /// duplicated at all.
    #[serde(default = "default_repeat_threshold")]
    pub repeat_threshold: u64,
    /// Allow-list applied to every run.
    #[serde(default)]
    pub allowed_patterns: Vec<String>,
    /// Extra allow-list entries applied only to upgrade runs.
    #[serde(default)]
    pub upgrade_allowed_patterns: Vec<String>,
    /// Tracked bugs with optional platform/topology scoping.
    #[serde(default)]
    pub known_problems: Vec<KnownProblemConfig>,
}

fn default_repeat_threshold() -> u64 {
    20
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            repeat_threshold: default_repeat_threshold(),
            allowed_patterns: Vec::new(),
            upgrade_allowed_patterns: Vec::new(),
            known_problems: Vec::new(),
        }
    }
}

/// One `[[evaluator.known_problems]]` entry.
///
/// Scope fields are three-way: omitted means "applies everywhere", an empty
/// string means "applies only when the run's value is itself empty", and a
/// value requires an exact match.
#[derive(Debug, Clone, Deserialize)]
pub struct KnownProblemConfig {
    /// Regex source matched against parsed message bodies.
    pub pattern: String,
    /// Tracking identifier attached to matches, e.g. a bug URL.
    pub reference: String,
    /// Optional platform scope.
    #[serde(default)]
    pub platform: Option<String>,
    /// Optional topology scope.
    #[serde(default)]
    pub topology: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/noisegate/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("noisegate")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
