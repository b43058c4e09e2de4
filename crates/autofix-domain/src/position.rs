use serde::{Deserialize, Serialize};

/// Employee position. Stored in the database as the two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "AD")]
    Administrator,
    #[serde(rename = "WM")]
    WarehouseManager,
    #[serde(rename = "SM")]
    ServiceManager,
    #[serde(rename = "ME")]
    Mechanic,
    #[serde(rename = "CA")]
    Cashier,
}

impl Position {
    pub fn code(self) -> &'static str {
        match self {
            Self::Administrator => "AD",
            Self::WarehouseManager => "WM",
            Self::ServiceManager => "SM",
            Self::Mechanic => "ME",
            Self::Cashier => "CA",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AD" => Some(Self::Administrator),
            "WM" => Some(Self::WarehouseManager),
            "SM" => Some(Self::ServiceManager),
            "ME" => Some(Self::Mechanic),
            "CA" => Some(Self::Cashier),
            _ => None,
        }
    }

    /// Human-readable job title shown by the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Administrator => "Администратор",
            Self::WarehouseManager => "Менеджер запчастей",
            Self::ServiceManager => "Менеджер сервиса",
            Self::Mechanic => "Механик",
            Self::Cashier => "Кассир",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_round_trip_codes() {
        for position in [
            Position::Administrator,
            Position::WarehouseManager,
            Position::ServiceManager,
            Position::Mechanic,
            Position::Cashier,
        ] {
            assert_eq!(Position::from_code(position.code()), Some(position));
        }
    }

    #[test]
    fn should_reject_unknown_code() {
        assert_eq!(Position::from_code("XX"), None);
        assert_eq!(Position::from_code(""), None);
    }

    #[test]
    fn should_serialize_as_code() {
        assert_eq!(
            serde_json::to_string(&Position::Mechanic).unwrap(),
            "\"ME\""
        );
        let parsed: Position = serde_json::from_str("\"CA\"").unwrap();
        assert_eq!(parsed, Position::Cashier);
    }
}
