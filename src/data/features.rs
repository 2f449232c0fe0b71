use std::fmt;
use std::str::FromStr;

pub const FEATURE_NAMES: [&str; 7] = ["N", "P", "K", "temperature", "humidity", "ph", "rainfall"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Slider,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl FieldSpec {
    pub fn clamp(&self, value: f64) -> f64 {
        let value = value.clamp(self.min, self.max);
        match self.kind {
            FieldKind::Integer => value.round(),
            FieldKind::Slider => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Nitrogen,
        Field::Phosphorus,
        Field::Potassium,
        Field::Temperature,
        Field::Humidity,
        Field::Ph,
        Field::Rainfall,
    ];

    pub fn spec(self) -> FieldSpec {
        match self {
            Field::Nitrogen => FieldSpec {
                name: "N",
                label: "Nitrogen (N)",
                kind: FieldKind::Integer,
                min: 0.0,
                max: 200.0,
                default: 50.0,
            },
            Field::Phosphorus => FieldSpec {
                name: "P",
                label: "Phosphorus (P)",
                kind: FieldKind::Integer,
                min: 0.0,
                max: 200.0,
                default: 50.0,
            },
            Field::Potassium => FieldSpec {
                name: "K",
                label: "Potassium (K)",
                kind: FieldKind::Integer,
                min: 0.0,
                max: 200.0,
                default: 50.0,
            },
            Field::Temperature => FieldSpec {
                name: "temperature",
                label: "Temperature (°C)",
                kind: FieldKind::Slider,
                min: 0.0,
                max: 50.0,
                default: 25.0,
            },
            Field::Humidity => FieldSpec {
                name: "humidity",
                label: "Humidity (%)",
                kind: FieldKind::Slider,
                min: 0.0,
                max: 100.0,
                default: 60.0,
            },
            Field::Ph => FieldSpec {
                name: "ph",
                label: "pH Value",
                kind: FieldKind::Slider,
                min: 0.0,
                max: 14.0,
                default: 6.5,
            },
            Field::Rainfall => FieldSpec {
                name: "rainfall",
                label: "Rainfall (mm)",
                kind: FieldKind::Slider,
                min: 0.0,
                max: 500.0,
                default: 100.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field `{}`", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the schema name in any case, plus the long nutrient names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let field = match key.as_str() {
            "n" | "nitrogen" => Field::Nitrogen,
            "p" | "phosphorus" => Field::Phosphorus,
            "k" | "potassium" => Field::Potassium,
            "temperature" | "temp" => Field::Temperature,
            "humidity" => Field::Humidity,
            "ph" => Field::Ph,
            "rainfall" | "rain" => Field::Rainfall,
            _ => return Err(UnknownField(s.trim().to_string())),
        };
        Ok(field)
    }
}

/// One soil/weather sample as entered by the user.
///
/// Every setter clamps to the field's bounds, so a `FeatureVector` is always
/// within range by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    nitrogen: u32,
    phosphorus: u32,
    potassium: u32,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        FeatureVector {
            nitrogen: 50,
            phosphorus: 50,
            potassium: 50,
            temperature: 25.0,
            humidity: 60.0,
            ph: 6.5,
            rainfall: 100.0,
        }
    }
}

impl FeatureVector {
    pub fn new(
        nitrogen: u32,
        phosphorus: u32,
        potassium: u32,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        let mut features = FeatureVector::default();
        features.set(Field::Nitrogen, f64::from(nitrogen));
        features.set(Field::Phosphorus, f64::from(phosphorus));
        features.set(Field::Potassium, f64::from(potassium));
        features.set(Field::Temperature, temperature);
        features.set(Field::Humidity, humidity);
        features.set(Field::Ph, ph);
        features.set(Field::Rainfall, rainfall);
        features
    }

    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Nitrogen => f64::from(self.nitrogen),
            Field::Phosphorus => f64::from(self.phosphorus),
            Field::Potassium => f64::from(self.potassium),
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::Ph => self.ph,
            Field::Rainfall => self.rainfall,
        }
    }

    /// Sets `field`, clamped to its bounds. Non-finite values leave the
    /// field unchanged and return `false`.
    pub fn set(&mut self, field: Field, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let value = field.spec().clamp(value);
        match field {
            Field::Nitrogen => self.nitrogen = value as u32,
            Field::Phosphorus => self.phosphorus = value as u32,
            Field::Potassium => self.potassium = value as u32,
            Field::Temperature => self.temperature = value,
            Field::Humidity => self.humidity = value,
            Field::Ph => self.ph = value,
            Field::Rainfall => self.rainfall = value,
        }
        true
    }

    pub fn values(&self) -> [f64; 7] {
        Field::ALL.map(|field| self.get(field))
    }

    pub fn to_record(&self) -> FeatureRecord {
        FeatureRecord {
            columns: Field::ALL
                .iter()
                .map(|&field| (field.name().to_string(), self.get(field)))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub columns: Vec<(String, f64)>,
}

impl FeatureRecord {
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|&(_, value)| value).collect()
    }
}
