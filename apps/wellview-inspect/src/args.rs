//! 命令行参数解析
//!
//! `wellview-inspect <view> <asset-id> <customer-id> [locale] [--poc-type N]`

use domain::{AssetId, CustomerId};

pub const USAGE: &str = "usage: wellview-inspect <rtu|host|facility-tags|cameras|facility> \
<asset-id> <customer-id> [locale] [--poc-type N]";

#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("{0} required")]
    Missing(&'static str),
    #[error("unknown view: {0}")]
    UnknownView(String),
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
}

/// 可查询的视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Rtu,
    Host,
    FacilityTags,
    Cameras,
    Facility,
}

impl View {
    pub fn parse(value: &str) -> Result<Self, ArgsError> {
        match value.trim() {
            "rtu" => Ok(View::Rtu),
            "host" => Ok(View::Host),
            "facility-tags" => Ok(View::FacilityTags),
            "cameras" => Ok(View::Cameras),
            "facility" => Ok(View::Facility),
            other => Err(ArgsError::UnknownView(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Rtu => "rtu",
            View::Host => "host",
            View::FacilityTags => "facility-tags",
            View::Cameras => "cameras",
            View::Facility => "facility",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub view: View,
    pub asset_id: AssetId,
    pub customer_id: CustomerId,
    pub locale: String,
    pub poc_type: Option<i32>,
}

impl InspectArgs {
    pub fn parse<I>(args: I, default_locale: &str) -> Result<Self, ArgsError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut poc_type = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--poc-type" {
                let value = args.next().ok_or(ArgsError::Missing("poc-type"))?;
                let parsed = value
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ArgsError::Invalid("poc-type", value))?;
                poc_type = Some(parsed);
            } else {
                positional.push(arg);
            }
        }

        let mut positional = positional.into_iter();
        let view = View::parse(&positional.next().ok_or(ArgsError::Missing("view"))?)?;
        let asset_id = positional.next().ok_or(ArgsError::Missing("asset-id"))?;
        let asset_id =
            AssetId::parse(&asset_id).map_err(|_| ArgsError::Invalid("asset-id", asset_id))?;
        let customer_id = positional.next().ok_or(ArgsError::Missing("customer-id"))?;
        let customer_id = CustomerId::parse(&customer_id)
            .map_err(|_| ArgsError::Invalid("customer-id", customer_id))?;
        let locale = positional
            .next()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_locale.to_string());

        Ok(Self {
            view,
            asset_id,
            customer_id,
            locale,
            poc_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_positional_arguments() {
        let parsed = InspectArgs::parse(
            args(&[
                "host",
                "61e72096-72d4-4878-afb7-f042e0a30118",
                "0b0d5e33-6b59-4b73-9d89-4d6f0f7b1a10",
                "es",
            ]),
            "en",
        )
        .expect("args");
        assert_eq!(parsed.view, View::Host);
        assert_eq!(parsed.locale, "es");
        assert!(parsed.poc_type.is_none());
    }

    #[test]
    fn locale_defaults_and_poc_type_flag() {
        let parsed = InspectArgs::parse(
            args(&[
                "rtu",
                "--poc-type",
                "17",
                "61e72096-72d4-4878-afb7-f042e0a30118",
                "0b0d5e33-6b59-4b73-9d89-4d6f0f7b1a10",
            ]),
            "en",
        )
        .expect("args");
        assert_eq!(parsed.view, View::Rtu);
        assert_eq!(parsed.locale, "en");
        assert_eq!(parsed.poc_type, Some(17));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            InspectArgs::parse(args(&["alarms"]), "en"),
            Err(ArgsError::UnknownView(_))
        ));
        assert!(matches!(
            InspectArgs::parse(args(&["host", "not-a-uuid", "x"]), "en"),
            Err(ArgsError::Invalid("asset-id", _))
        ));
        assert!(matches!(
            InspectArgs::parse(args(&["host"]), "en"),
            Err(ArgsError::Missing("asset-id"))
        ));
    }
}
