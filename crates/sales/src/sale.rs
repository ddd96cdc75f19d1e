use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salesight_core::{DomainError, DomainResult, Entity, ProductId, SaleId};

/// A completed sales transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub quantity: u32,
    /// Total charged, in minor currency units.
    pub total_cents: u64,
    pub occurred_at: DateTime<Utc>,
}

impl Sale {
    pub fn new(
        id: SaleId,
        product_id: ProductId,
        quantity: u32,
        total_cents: u64,
        occurred_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("sale quantity must be positive"));
        }
        Ok(Self {
            id,
            product_id,
            quantity,
            total_cents,
            occurred_at,
        })
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let err = Sale::new(SaleId::new(), ProductId::new(), 0, 100, at()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let sale = Sale::new(SaleId::new(), ProductId::new(), 2, 1_998, at()).unwrap();
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["quantity"], 2);
        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }
}
