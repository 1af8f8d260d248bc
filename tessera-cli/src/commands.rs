//! Subcommand handlers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use tracing::{info, warn};
use zeroize::Zeroizing;

use tessera_crypto_core::{build_challenge, SecretBytes};
use tessera_engine::{
    Authenticator, CredentialHandle, EngineConfig, FormattingStrategy, GeneratedArtifact,
    GenerationCoordinator, NullAuthenticator, SoftwareAuthenticator,
};

use crate::cli::GenerateArgs;

/// Credential used with the demo key when none is given.
pub const DEMO_CREDENTIAL: &[u8] = b"tessera-demo-credential";

/// Sample services shown by `tessera demo`.
pub const DEMO_SERVICES: [&str; 4] = [
    "example.com",
    "info.example.com",
    "sub.domain.co.uk",
    "localhost",
];

const DATA_DIR_NAME: &str = ".tessera";

/// `$HOME/.tessera`, if a home directory is known.
pub fn default_data_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

pub async fn generate(args: &GenerateArgs, config: &EngineConfig) -> Result<()> {
    let strategy = args
        .strategy
        .map_or(config.default_strategy, FormattingStrategy::from);
    let credential = resolve_credential(args.credential.as_deref(), args.demo)?;

    let artifact = if args.demo {
        warn!("demo mode: outputs come from a public key and are not secret");
        run(SoftwareAuthenticator::demo(), config, &credential, args, strategy).await?
    } else if let Some(path) = &args.secret_file {
        let authenticator = SoftwareAuthenticator::new(read_secret(path)?);
        run(authenticator, config, &credential, args, strategy).await?
    } else {
        run(NullAuthenticator, config, &credential, args, strategy).await?
    };

    print_artifact(&artifact, args.json)
}

async fn run<A: Authenticator>(
    authenticator: A,
    config: &EngineConfig,
    credential: &CredentialHandle,
    args: &GenerateArgs,
    strategy: FormattingStrategy,
) -> Result<GeneratedArtifact> {
    let provider = authenticator.provider_name();
    let coordinator = GenerationCoordinator::from_config(authenticator, config)?;
    info!(provider, "generating");
    coordinator
        .generate(credential, &args.service, args.version, strategy)
        .await
        .with_context(|| format!("cannot generate for {:?}", args.service))
}

fn print_artifact(artifact: &GeneratedArtifact, json: bool) -> Result<()> {
    if json {
        let out = Zeroizing::new(serde_json::to_string_pretty(artifact)?);
        println!("{}", out.as_str());
    } else {
        println!("{}", artifact.value);
        if let Some(annotation) = &artifact.annotation {
            println!("{annotation}");
        }
    }
    Ok(())
}

/// Decode `--credential`, or fall back to the demo credential in demo mode.
pub fn resolve_credential(hex: Option<&str>, demo: bool) -> Result<CredentialHandle> {
    match hex {
        Some(hex) => {
            let bytes = HEXLOWER_PERMISSIVE
                .decode(hex.trim().as_bytes())
                .context("credential is not valid hex")?;
            if bytes.is_empty() {
                bail!("credential is empty");
            }
            Ok(CredentialHandle::new(bytes))
        }
        None if demo => Ok(CredentialHandle::new(DEMO_CREDENTIAL)),
        None => bail!("--credential is required unless --demo is set"),
    }
}

/// Read a hex-encoded 32-byte secret.
pub fn read_secret(path: &Path) -> Result<SecretBytes<32>> {
    let text = Zeroizing::new(
        fs::read_to_string(path)
            .with_context(|| format!("cannot read secret file {}", path.display()))?,
    );
    let bytes = Zeroizing::new(
        HEXLOWER_PERMISSIVE
            .decode(text.trim().as_bytes())
            .context("secret file is not valid hex")?,
    );
    let secret: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| anyhow!("secret must be 32 bytes, got {}", bytes.len()))?;
    Ok(SecretBytes::new(secret))
}

// ---------------------------------------------------------------------------
// canonicalize
// ---------------------------------------------------------------------------

pub fn canonicalize(service: &str) -> Result<()> {
    let (label, challenge) = build_challenge(service)?;
    println!("label:     {label}");
    println!("challenge: {}", HEXLOWER.encode(challenge.as_bytes()));
    Ok(())
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

pub async fn demo(version: u32, config: &EngineConfig) -> Result<()> {
    warn!("demo mode: outputs come from a public key and are not secret");
    let coordinator = GenerationCoordinator::from_config(SoftwareAuthenticator::demo(), config)?;
    let credential = CredentialHandle::new(DEMO_CREDENTIAL);

    for service in DEMO_SERVICES {
        let password = coordinator
            .generate(&credential, service, version, FormattingStrategy::Password)
            .await?;
        let codename = coordinator
            .generate(&credential, service, version, FormattingStrategy::Codename)
            .await?;
        let repeat = coordinator
            .generate(&credential, service, version, FormattingStrategy::Password)
            .await?;
        if repeat.value != password.value {
            bail!("repeat generation for {service:?} did not match");
        }
        println!(
            "{service:<18} {label:<10} {password}  {codename} ({reading})  repeat: ok",
            label = password.service_name,
            password = password.value,
            codename = codename.value,
            reading = codename.annotation.as_deref().unwrap_or_default(),
        );
    }
    info!(
        services = DEMO_SERVICES.len(),
        signatures = coordinator.authenticator().sign_count(),
        "demo complete"
    );
    Ok(())
}
