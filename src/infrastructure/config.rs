use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_max_upload_mb() -> usize {
    25
}

fn default_export_file_name() -> String {
    "pneus_filtrados.csv".to_string()
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

/// Knobs that distinguish one fleet dashboard from another.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub title: String,
    /// Life-stage label that marks a new (never retreaded) tire.
    pub new_life_stage: String,
    pub sheets: SheetNames,
    pub inventory: InventoryColumns,
    pub positions: PositionColumns,
    pub tread_reference: TreadReferenceColumns,
    pub thresholds: TreadThresholds,
    pub vehicle_types: VehicleTypeRules,
    /// Manual per-status count corrections. Empty unless a profile sets them.
    pub status_offsets: Vec<StatusOffset>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            title: "Gestão de Pneus".to_string(),
            new_life_stage: "Novo".to_string(),
            sheets: SheetNames::default(),
            inventory: InventoryColumns::default(),
            positions: PositionColumns::default(),
            tread_reference: TreadReferenceColumns::default(),
            thresholds: TreadThresholds::default(),
            vehicle_types: VehicleTypeRules::default(),
            status_offsets: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SheetNames {
    pub inventory: Vec<String>,
    pub positions: Vec<String>,
    pub tread_reference: Vec<String>,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            inventory: aliases(&["pneus"]),
            positions: aliases(&["posição"]),
            tread_reference: aliases(&["sulco"]),
        }
    }
}

/// A column known by any of several header spellings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ColumnSpec {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

impl ColumnSpec {
    pub fn required(names: &[&str]) -> Self {
        Self {
            aliases: aliases(names),
            required: true,
        }
    }

    pub fn optional(names: &[&str]) -> Self {
        Self {
            aliases: aliases(names),
            required: false,
        }
    }

    pub fn display_name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct InventoryColumns {
    pub reference: ColumnSpec,
    pub plate: ColumnSpec,
    pub vehicle_description: ColumnSpec,
    pub brand: ColumnSpec,
    pub model: ColumnSpec,
    pub life_stage: ColumnSpec,
    pub status: ColumnSpec,
    pub position_code: ColumnSpec,
    pub measured_tread: ColumnSpec,
    pub initial_odometer: ColumnSpec,
    pub observation: ColumnSpec,
    pub life_distance: ColumnSpec,
}

impl Default for InventoryColumns {
    fn default() -> Self {
        Self {
            reference: ColumnSpec::optional(&["Referência"]),
            plate: ColumnSpec::optional(&["Veículo - Placa", "Placa"]),
            vehicle_description: ColumnSpec::optional(&["Veículo - Descrição", "Descrição do Veículo"]),
            brand: ColumnSpec::optional(&["Marca (Atual)", "Marca"]),
            model: ColumnSpec::required(&["Modelo (Atual)", "Modelo"]),
            life_stage: ColumnSpec::required(&["Vida"]),
            status: ColumnSpec::optional(&["Status"]),
            position_code: ColumnSpec::optional(&["Sigla da Posição", "Sigla"]),
            measured_tread: ColumnSpec::required(&["Aferição - Sulco", "Sulco Atual"]),
            initial_odometer: ColumnSpec::optional(&["Hodômetro Inicial"]),
            observation: ColumnSpec::optional(&["Observação"]),
            life_distance: ColumnSpec::optional(&["Vida do Pneu - Km. Rodado", "Km Rodado"]),
        }
    }
}

impl InventoryColumns {
    pub fn specs(&self) -> [&ColumnSpec; 12] {
        [
            &self.reference,
            &self.plate,
            &self.vehicle_description,
            &self.brand,
            &self.model,
            &self.life_stage,
            &self.status,
            &self.position_code,
            &self.measured_tread,
            &self.initial_odometer,
            &self.observation,
            &self.life_distance,
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PositionColumns {
    pub code: ColumnSpec,
    pub description: ColumnSpec,
}

impl Default for PositionColumns {
    fn default() -> Self {
        Self {
            code: ColumnSpec::required(&["Sigla da Posição", "Sigla"]),
            description: ColumnSpec::required(&["Posição", "Descrição"]),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct TreadReferenceColumns {
    pub life_stage: ColumnSpec,
    pub model: ColumnSpec,
    pub tread: ColumnSpec,
}

impl Default for TreadReferenceColumns {
    fn default() -> Self {
        Self {
            life_stage: ColumnSpec::required(&["Vida"]),
            model: ColumnSpec::required(&["Modelo (Atual)", "Modelo"]),
            tread: ColumnSpec::required(&["Sulco", "Sulco Inicial"]),
        }
    }
}

/// Tread below `critical_mm` is critical, below `warning_mm` a warning.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TreadThresholds {
    pub critical_mm: f64,
    pub warning_mm: f64,
}

impl Default for TreadThresholds {
    fn default() -> Self {
        Self {
            critical_mm: 2.0,
            warning_mm: 4.0,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VehicleTypeRule {
    pub label: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword rules; the first rule with a matching keyword wins.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct VehicleTypeRules {
    pub fallback: String,
    pub rules: Vec<VehicleTypeRule>,
}

impl Default for VehicleTypeRules {
    fn default() -> Self {
        let rule = |label: &str, keywords: &[&str]| VehicleTypeRule {
            label: label.to_string(),
            keywords: aliases(keywords),
        };
        Self {
            fallback: "Outro".to_string(),
            rules: vec![
                rule("Leve", &["saveiro"]),
                rule("Utilitário", &["renault", "iveco", "daily", "scudo"]),
                rule("3/4", &["3/4"]),
                rule("Toco", &["toco"]),
                rule("Truck", &["truck"]),
                rule("Carreta", &["cavalo", "carreta"]),
            ],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StatusOffset {
    pub status: String,
    pub offset: i64,
}

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl PipelineConfig {
    /// Checks the invariants the pipeline relies on; run once after loading.
    pub fn validate(&self) -> Result<(), String> {
        let TreadThresholds {
            critical_mm,
            warning_mm,
        } = self.thresholds;
        if !critical_mm.is_finite() || !warning_mm.is_finite() {
            return Err("tread thresholds must be finite numbers".to_string());
        }
        if critical_mm > warning_mm {
            return Err(format!(
                "critical threshold ({} mm) must not exceed warning threshold ({} mm)",
                critical_mm, warning_mm
            ));
        }

        let sheet_lists = [
            ("sheets.inventory", &self.sheets.inventory),
            ("sheets.positions", &self.sheets.positions),
            ("sheets.tread_reference", &self.sheets.tread_reference),
        ];
        for (name, list) in sheet_lists {
            if list.iter().all(|s| s.trim().is_empty()) {
                return Err(format!("{} needs at least one sheet name", name));
            }
        }

        let column_specs = self
            .inventory
            .specs()
            .into_iter()
            .chain([&self.positions.code, &self.positions.description])
            .chain([
                &self.tread_reference.life_stage,
                &self.tread_reference.model,
                &self.tread_reference.tread,
            ]);
        for spec in column_specs {
            if spec.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err("every column needs at least one alias".to_string());
            }
        }

        if self.vehicle_types.fallback.trim().is_empty() {
            return Err("vehicle_types.fallback must not be empty".to_string());
        }
        if self.vehicle_types.rules.iter().any(|r| r.label.trim().is_empty()) {
            return Err("vehicle type rules need a label".to_string());
        }

        Ok(())
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(
            config::Environment::with_prefix("TIRES")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Loads `config/pipeline`, then `config/profiles/<profile>` on top of it.
pub fn load_pipeline_config(profile: Option<&str>) -> anyhow::Result<PipelineConfig> {
    let mut builder = config::Config::builder()
        .add_source(config::File::with_name("config/pipeline").required(false));

    if let Some(profile) = profile {
        builder = builder.add_source(config::File::with_name(&format!("config/profiles/{}", profile)));
    }

    let pipeline: PipelineConfig = builder.build()?.try_deserialize()?;
    pipeline
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid pipeline configuration: {}", e))?;

    Ok(pipeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> PipelineConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.status_offsets.is_empty());
        assert_eq!(config.thresholds.critical_mm, 2.0);
        assert_eq!(config.thresholds.warning_mm, 4.0);
    }

    #[test]
    fn test_profile_overrides_only_what_it_sets() {
        let config = from_toml(
            r#"
            [thresholds]
            critical_mm = 3.0

            [[status_offsets]]
            status = "Sucata"
            offset = 6
            "#,
        );

        assert_eq!(config.thresholds.critical_mm, 3.0);
        assert_eq!(config.thresholds.warning_mm, 4.0);
        assert_eq!(config.status_offsets.len(), 1);
        assert_eq!(config.status_offsets[0].status, "Sucata");
        assert_eq!(config.inventory, InventoryColumns::default());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = PipelineConfig::default();
        config.thresholds = TreadThresholds {
            critical_mm: 5.0,
            warning_mm: 4.0,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_vehicle_label_rejected() {
        let mut config = PipelineConfig::default();
        config.vehicle_types.rules.push(VehicleTypeRule {
            label: " ".to_string(),
            keywords: vec!["bitrem".to_string()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_config_renders_as_toml() {
        let rendered = PipelineConfig::default().to_toml().unwrap();
        let parsed: PipelineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, PipelineConfig::default());
    }

    #[test]
    fn test_server_settings_overridden_from_env() {
        // SAFETY: no other test reads or writes TIRES_SERVER__* variables
        unsafe {
            std::env::set_var("TIRES_SERVER__PORT", "9999");
        }
        let config = load_server_config();
        unsafe {
            std::env::remove_var("TIRES_SERVER__PORT");
        }

        let config = config.unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "0.0.0.0");
    }
}
