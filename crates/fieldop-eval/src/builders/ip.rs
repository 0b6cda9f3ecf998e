//! IP transform operator: `ip_version`.

use std::net::IpAddr;

use fieldop_parser::{Definition, Parameter};
use serde_json::Value;

use super::{arity_max, require_string};
use crate::error::{BuildError, Result, RuntimeError};
use crate::event::Event;
use crate::expression::{Expression, Op};

/// Compiled IP-family inspection: writes `4` or `6` to the target.
///
/// `source: None` means the target field itself holds the address.
#[derive(Debug, Clone)]
pub(crate) struct IpOp {
    source: Option<String>,
}

pub(crate) fn build_ip_version(def: &Definition) -> Result<Expression> {
    arity_max(def, "ip_version", 1)?;

    let source = match def.params.first() {
        None => None,
        Some(Parameter::Reference(path)) => Some(path.clone()),
        Some(Parameter::Literal(_)) => {
            return Err(BuildError::InvalidArguments {
                operator: "ip_version",
                reason: "parameter must be a source field reference".to_string(),
            });
        }
    };

    let op = IpOp { source };
    Ok(Expression::new("ip_version", &def.field, Op::Ip(op)))
}

impl IpOp {
    pub(crate) fn apply(&self, target: &str, event: &mut Event) -> Result<(), RuntimeError> {
        let path = self.source.as_deref().unwrap_or(target);
        let s = require_string(event, path)?;
        let version = match s.parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => 4,
            Ok(IpAddr::V6(_)) => 6,
            Err(_) => return Err(RuntimeError::InvalidIp(s)),
        };
        event.set(target, Value::from(version));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldop_parser::parse_definition;
    use serde_json::json;

    fn apply(text: &str, field: &str, event: &mut Value) -> Result<(), RuntimeError> {
        let def = parse_definition(field, text).unwrap();
        let expr = build_ip_version(&def).unwrap();
        expr.invoke(&mut Event::new(event)).map(|_| ())
    }

    #[test]
    fn test_v4_from_reference() {
        let mut event = json!({"src": "192.168.1.10"});
        apply("+ip_version/$src", "src_version", &mut event).unwrap();
        assert_eq!(event["src_version"], json!(4));
    }

    #[test]
    fn test_v6_from_reference() {
        let mut event = json!({"src": "2001:db8::1"});
        apply("+ip_version/$src", "src_version", &mut event).unwrap();
        assert_eq!(event["src_version"], json!(6));
    }

    #[test]
    fn test_in_place_without_param() {
        let mut event = json!({"addr": "10.0.0.1"});
        apply("+ip_version", "addr", &mut event).unwrap();
        assert_eq!(event["addr"], json!(4));
    }

    #[test]
    fn test_reference_form_overwrites_deterministically() {
        let mut event = json!({"src": "10.0.0.1", "src_version": 6});
        apply("+ip_version/$src", "src_version", &mut event).unwrap();
        apply("+ip_version/$src", "src_version", &mut event).unwrap();
        assert_eq!(event["src_version"], json!(4));
    }

    #[test]
    fn test_unparsable_address_errors() {
        let mut event = json!({"src": "not-an-ip"});
        let err = apply("+ip_version/$src", "v", &mut event).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidIp(_)));
    }

    #[test]
    fn test_literal_param_fails_build() {
        let def = parse_definition("v", "+ip_version/10.0.0.1").unwrap();
        assert!(matches!(
            build_ip_version(&def).unwrap_err(),
            BuildError::InvalidArguments { .. }
        ));
    }
}
