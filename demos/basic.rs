use fakenews_classifier::{ModelArtifact, Pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // toy model: "palsu" pushes towards FAKE, "asli" towards REAL
    let vocabulary = ["berita", "palsu", "fakta", "asli"]
        .into_iter()
        .enumerate()
        .map(|(idx, term)| (term.to_string(), idx))
        .collect();
    let artifact = ModelArtifact::new(
        vec!["FAKE".to_string(), "REAL".to_string()],
        vocabulary,
        vec![1.0, 2.0, 1.0, 2.0],
        vec![vec![0.1, 0.9, -0.2, -0.8], vec![-0.1, -0.9, 0.2, 0.8]],
        vec![0.0, 0.0],
    );

    let path = std::env::temp_dir().join("fakenews-demo-model.cbor");
    artifact.save(&path)?;
    let pipeline = Pipeline::load(&path)?;

    for doc in ["Berita palsu, palsu!", "Fakta asli", ""] {
        let inference = pipeline.infer(doc);
        println!(
            "{:?} -> {} ({:.2}%){}",
            doc,
            inference.label,
            inference.confidence,
            if inference.is_degenerate() { " [no known terms]" } else { "" }
        );
    }
    println!("{}", serde_json::to_string_pretty(&pipeline.infer("berita palsu palsu"))?);
    Ok(())
}
