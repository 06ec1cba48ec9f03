// Vehicle classifier - keyword tagging of vehicle descriptions
use crate::infrastructure::config::VehicleTypeRules;

#[derive(Debug, Clone)]
pub struct VehicleClassifier {
    rules: Vec<(String, Vec<String>)>,
    fallback: String,
}

impl VehicleClassifier {
    pub fn new(config: &VehicleTypeRules) -> Self {
        let rules = config
            .rules
            .iter()
            .map(|rule| {
                let keywords = rule
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (rule.label.clone(), keywords)
            })
            .collect();

        Self {
            rules,
            fallback: config.fallback.clone(),
        }
    }

    /// First rule with a keyword contained in the description wins.
    pub fn classify(&self, description: Option<&str>) -> &str {
        let Some(description) = description else {
            return &self.fallback;
        };
        let lowered = description.to_lowercase();

        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map(|(label, _)| label.as_str())
            .unwrap_or(&self.fallback)
    }
}
