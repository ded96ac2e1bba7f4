use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingZone {
    pub id: String,
    pub name: String,
    pub cost: f64,
    /// Сумма заказа, начиная с которой доставка бесплатна
    #[serde(default)]
    pub free_from: Option<f64>,
    #[serde(default)]
    pub delivery_days: Option<u32>,
}

impl ShippingZone {
    pub fn cost_for(&self, order_total: f64) -> f64 {
        match self.free_from {
            Some(threshold) if order_total >= threshold => 0.0,
            _ => self.cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShippingZone {
    pub name: String,
    pub cost: f64,
    pub free_from: Option<f64>,
    pub delivery_days: Option<u32>,
}

pub type UpdateShippingZone = CreateShippingZone;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_for_threshold() {
        let zone = ShippingZone {
            id: "z1".to_string(),
            name: "North".to_string(),
            cost: 6.5,
            free_from: Some(100.0),
            delivery_days: Some(2),
        };
        assert_eq!(zone.cost_for(99.99), 6.5);
        assert_eq!(zone.cost_for(100.0), 0.0);
    }
}
