//! Integration tests for the reconcile module public API.

use pep508_rs::{MarkerEnvironment, MarkerEnvironmentBuilder};
use pyprep::reconcile::{Decision, InstallReason, InstalledSnapshot, Reconciler, SkipReason};

fn linux_py311() -> MarkerEnvironment {
    MarkerEnvironment::try_from(MarkerEnvironmentBuilder {
        implementation_name: "cpython",
        implementation_version: "3.11.8",
        os_name: "posix",
        platform_machine: "x86_64",
        platform_python_implementation: "CPython",
        platform_release: "6.1.0",
        platform_system: "Linux",
        platform_version: "#1 SMP",
        python_full_version: "3.11.8",
        python_version: "3.11",
        sys_platform: "linux",
    })
    .unwrap()
}

const MANIFEST: &str = r#"
# Data stack
numpy==1.26.0
requests>=2.31,<3; python_version>="3.8"
pywin32>=306; sys_platform == "win32"

git+https://example.com/pkg.git#egg=pkg
-e ./vendor/tool
--extra-index-url https://download.pytorch.org/whl/cpu
torch  # large
Pandas>=2.0rc1
scikit_learn
"#;

#[test]
fn reconciles_a_realistic_manifest() {
    let installed = InstalledSnapshot::from_pairs([
        ("numpy", "1.26.0"),
        ("requests", "2.20.0"),
        ("pandas", "2.0.0rc1"),
        ("scikit-learn", "1.4.0"),
    ]);
    let markers = linux_py311();

    let result = Reconciler::new(&installed, &markers).reconcile(MANIFEST.lines());

    assert_eq!(
        result.to_install(),
        vec![
            r#"requests>=2.31,<3; python_version>="3.8""#,
            "git+https://example.com/pkg.git#egg=pkg",
            "-e ./vendor/tool",
            "--extra-index-url https://download.pytorch.org/whl/cpu",
            "torch",
        ]
    );
    assert!(!result.is_satisfied());
}

#[test]
fn every_declaration_gets_one_decision() {
    let installed = InstalledSnapshot::new();
    let markers = linux_py311();

    let result = Reconciler::new(&installed, &markers).reconcile(MANIFEST.lines());

    // Nine declarations; comments and blank lines produce nothing
    assert_eq!(result.decisions().len(), 9);
    assert!(result
        .decisions()
        .iter()
        .all(|d| !d.declaration().starts_with('#') && !d.declaration().is_empty()));
}

#[test]
fn decisions_carry_reasons() {
    let installed = InstalledSnapshot::from_pairs([("requests", "2.20.0"), ("numpy", "1.26.0")]);
    let markers = linux_py311();

    let result = Reconciler::new(&installed, &markers).reconcile([
        "numpy==1.26.0",
        "requests>=2.31",
        "pywin32; sys_platform == 'win32'",
        "torch",
    ]);
    let decisions = result.decisions();

    assert!(matches!(
        &decisions[0],
        Decision::Skip {
            reason: SkipReason::Satisfied { .. },
            ..
        }
    ));
    assert!(matches!(
        &decisions[1],
        Decision::Install {
            reason: InstallReason::VersionMismatch { .. },
            ..
        }
    ));
    assert!(matches!(
        &decisions[2],
        Decision::Skip {
            reason: SkipReason::MarkerNotSatisfied,
            ..
        }
    ));
    assert_eq!(decisions[3].to_string(), "Missing: torch");
}

#[test]
fn empty_manifest_is_satisfied() {
    let installed = InstalledSnapshot::new();
    let markers = linux_py311();

    let result = Reconciler::new(&installed, &markers).reconcile(["", "   ", "# nothing"]);
    assert!(result.is_satisfied());
    assert!(result.decisions().is_empty());
}
