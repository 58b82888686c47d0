//! Storage quantity validation
//!
//! `k8s-openapi` keeps quantities as opaque strings, so the size shorthand of
//! a volume claim is checked against the Kubernetes quantity grammar here
//! before it ends up in a claim's resource requests.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, Result};

/// `<signed number><suffix>` where the suffix is binary SI, decimal SI or a
/// decimal exponent
static QUANTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE]|[eE][+-]?[0-9]+)?$")
        .expect("valid quantity regex")
});

/// Parse a quantity string such as `1Gi`, `500M` or `1.5e3`
pub fn parse_quantity(value: &str) -> Result<Quantity> {
    if QUANTITY_RE.is_match(value) {
        Ok(Quantity(value.to_string()))
    } else {
        Err(ParseError::InvalidQuantity {
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_quantities() {
        for value in ["1Gi", "500Mi", "10G", "100m", "1.5Gi", "1e3", "2E6", "+1Ki", ".5", "1", "3E"] {
            assert_eq!(parse_quantity(value), Ok(Quantity(value.to_string())), "value: {value}");
        }
    }

    #[test]
    fn test_invalid_quantities() {
        for value in ["", "Gi", "1 Gi", "1GB", "1gi", "one", "1Gi1", "--1"] {
            assert_eq!(
                parse_quantity(value),
                Err(ParseError::InvalidQuantity {
                    value: value.to_string()
                }),
                "value: {value:?}"
            );
        }
    }
}
