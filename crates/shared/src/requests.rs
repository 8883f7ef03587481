use serde::{Deserialize, Serialize};

/// Body of `/register` and `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub character_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartMissionRequest {
    pub character_name: String,
    pub mission_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionActionRequest {
    pub character_name: String,
    pub mission_id: String,
    /// `move`, `fight` or `collect`.
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Body of `/shop/buy` and `/shop/sell`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub character_name: String,
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_quantity_defaults_to_one() {
        let req: TradeRequest =
            serde_json::from_str(r#"{"character_name":"Lia","item_name":"Fuga"}"#).unwrap();
        assert_eq!(req.quantity, 1);
    }

    #[test]
    fn action_target_is_optional() {
        let req: MissionActionRequest = serde_json::from_str(
            r#"{"character_name":"Lia","mission_id":"tumbas_farao","action":"move"}"#,
        )
        .unwrap();
        assert!(req.target.is_none());
    }
}
