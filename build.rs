use std::env;
use std::process::Command;

// CPU features the lane backends care about
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    fn features() -> Vec<CpuFeature> {
        vec![CpuFeature {
            name: "avx2",
            cfg_flag: "avx2",
            detected: false,
        }]
    }
}

trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = contents.contains(feature.name);
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                if feature.name == "avx2" {
                    feature.detected = contents.contains("hw.optional.avx2_0: 1");
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

fn detect_cpu_features(features: &mut [CpuFeature]) {
    let detectors: Vec<Box<dyn CpuFeatureDetector>> =
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)];

    for detector in detectors {
        if detector.is_applicable() {
            detector.detect_features(features);
            break;
        }
    }
}

fn main() {
    println!("cargo::rustc-check-cfg=cfg(avx2)");
    println!("cargo::rustc-check-cfg=cfg(fallback)");
    println!("cargo:rerun-if-changed=build.rs");

    let mut features = CpuFeature::features();

    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let is_x86 = target.starts_with("x86_64") || target.starts_with("i686");

    // Host probing only says something about the target on native builds.
    // The cfg is a preference; the runtime check in `simd::Backend` has the last word.
    if host == target && is_x86 {
        detect_cpu_features(&mut features);
    }

    let cfg_flag = features
        .iter()
        .find(|feature| feature.detected)
        .map(|feature| feature.cfg_flag)
        .unwrap_or("fallback");

    println!("cargo:rustc-cfg={cfg_flag}");
}
