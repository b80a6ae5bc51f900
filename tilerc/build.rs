use std::env;

fn main() {
    let features: Vec<String> = env::vars()
        .filter_map(|(name, _)| {
            name.strip_prefix("CARGO_FEATURE_")
                .map(|feature| feature.replace('_', "-").to_lowercase())
        })
        .filter(|feature| feature != "default")
        .collect();

    println!("cargo:rustc-env=TILERC_FEATURES={}", features.join(" "));
}
