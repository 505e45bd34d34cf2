//! Route table — every navigable screen and its route template.
//!
//! A template is a `/`-separated route string whose first segment is the
//! route name and whose remaining segments are `{placeholder}`s, e.g.
//! `metro_price/{metroCardNumber}/{amount}`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::NavError;

/// Placeholder values keyed by name.
pub type RouteArgs = BTreeMap<String, String>;

/// Screen identifiers for navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// First-run pager.
    OnboardingFlow,
    Home,
    History,
    Shop,
    Trade,
    SubmitEcoBrick,
    Learning,
    QrScanner,
    Success,
    SelectMetro,
    BengaluruMetro,
    ChennaiMetro,
    DelhiMetro,
    KochiMetro,
    PaymentDone,
    CrowdFunding,
    ProductCardFinal,
    /// Replays onboarding without touching the persisted flag.
    DebugOnboarding,
    FinalTrading,
    MetroPrice,
    AddMoney,
    CrowdFundingPayment,
}

impl Screen {
    /// Get all screens in route-table order.
    pub fn all() -> &'static [Screen] {
        &[
            Screen::OnboardingFlow,
            Screen::Home,
            Screen::History,
            Screen::Shop,
            Screen::Trade,
            Screen::SubmitEcoBrick,
            Screen::Learning,
            Screen::QrScanner,
            Screen::Success,
            Screen::SelectMetro,
            Screen::BengaluruMetro,
            Screen::ChennaiMetro,
            Screen::DelhiMetro,
            Screen::KochiMetro,
            Screen::PaymentDone,
            Screen::CrowdFunding,
            Screen::ProductCardFinal,
            Screen::DebugOnboarding,
            Screen::FinalTrading,
            Screen::MetroPrice,
            Screen::AddMoney,
            Screen::CrowdFundingPayment,
        ]
    }

    /// The route template, placeholders included.
    pub fn template(&self) -> &'static str {
        match self {
            Screen::OnboardingFlow => "onboarding_flow",
            Screen::Home => "home",
            Screen::History => "history",
            Screen::Shop => "shop",
            Screen::Trade => "trade",
            Screen::SubmitEcoBrick => "submit_eco_brick",
            Screen::Learning => "learning",
            Screen::QrScanner => "qrscanner",
            Screen::Success => "success",
            Screen::SelectMetro => "selectmetro",
            Screen::BengaluruMetro => "b_metro",
            Screen::ChennaiMetro => "chennai_metro",
            Screen::DelhiMetro => "delhi_metro",
            Screen::KochiMetro => "kochi_metro",
            Screen::PaymentDone => "payment_done",
            Screen::CrowdFunding => "crowwwd_funding",
            Screen::ProductCardFinal => "productCardFinal",
            Screen::DebugOnboarding => "debug_onboarding",
            Screen::FinalTrading => "finalTrading/{amount}",
            Screen::MetroPrice => "metro_price/{metroCardNumber}/{amount}",
            Screen::AddMoney => "add_money/{name}",
            Screen::CrowdFundingPayment => "crowdfunding_payment/{name}/{amount}",
        }
    }

    /// The route name: the template's first segment.
    pub fn name(&self) -> &'static str {
        let template = self.template();
        template.split('/').next().unwrap_or(template)
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.template()
            .split('/')
            .skip(1)
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }

    /// Look a screen up by route name.
    pub fn from_route_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.name() == name)
    }

    /// Whether the screen has a bottom navigation bar entry.
    pub fn is_bottom_bar(&self) -> bool {
        matches!(
            self,
            Screen::Home | Screen::History | Screen::Shop | Screen::Trade
        )
    }

    /// Whether the screen hosts the onboarding pager.
    pub fn is_onboarding(&self) -> bool {
        matches!(self, Screen::OnboardingFlow | Screen::DebugOnboarding)
    }

    /// Bind `args` to this screen's placeholders.
    ///
    /// Every placeholder needs a non-empty value without `/`. Arguments the
    /// template does not name are rejected.
    pub fn resolve(self, args: RouteArgs) -> Result<ResolvedRoute, NavError> {
        let placeholders = self.placeholders();

        if let Some(extra) = args
            .keys()
            .find(|k| !placeholders.iter().any(|p| *p == k.as_str()))
        {
            return Err(NavError::invalid(
                self.template(),
                format!("unexpected argument `{extra}`"),
            ));
        }

        for name in &placeholders {
            match args.get(*name) {
                None => {
                    return Err(NavError::invalid(
                        self.template(),
                        format!("missing argument `{name}`"),
                    ));
                }
                Some(value) if value.is_empty() => {
                    return Err(NavError::invalid(
                        self.template(),
                        format!("argument `{name}` is empty"),
                    ));
                }
                Some(value) if value.contains('/') => {
                    return Err(NavError::invalid(
                        self.template(),
                        format!("argument `{name}` contains `/`"),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(ResolvedRoute { screen: self, args })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

impl Serialize for Screen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.template())
    }
}

/// A screen with all of its placeholders bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute {
    pub screen: Screen,
    pub args: RouteArgs,
}

impl ResolvedRoute {
    /// Route to a screen without placeholders.
    pub fn bare(screen: Screen) -> Result<Self, NavError> {
        screen.resolve(RouteArgs::new())
    }

    /// Parse a concrete path such as `metro_price/12345/200`.
    pub fn parse(path: &str) -> Result<Self, NavError> {
        let path = path.trim().trim_matches('/');
        let mut segments = path.split('/');
        let name = segments.next().unwrap_or_default();
        let screen =
            Screen::from_route_name(name).ok_or_else(|| NavError::UnknownRoute(path.to_string()))?;

        let values: Vec<&str> = segments.collect();
        let placeholders = screen.placeholders();
        if values.len() != placeholders.len() {
            return Err(NavError::invalid(
                screen.template(),
                format!(
                    "expected {} argument(s), path `{path}` has {}",
                    placeholders.len(),
                    values.len()
                ),
            ));
        }

        let args = placeholders
            .into_iter()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        screen.resolve(args)
    }

    /// The concrete path, placeholders substituted.
    pub fn path(&self) -> String {
        self.screen
            .template()
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .and_then(|name| self.args.get(name))
                    .map(String::as_str)
                    .unwrap_or(segment)
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }
}

impl fmt::Display for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Build [`RouteArgs`] from `(name, value)` pairs.
pub fn route_args<I, K, V>(pairs: I) -> RouteArgs
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names_are_unique() {
        let mut names: Vec<&str> = Screen::all().iter().map(|s| s.name()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn name_round_trip() {
        for screen in Screen::all() {
            assert_eq!(Screen::from_route_name(screen.name()), Some(*screen));
        }
        assert_eq!(Screen::from_route_name("nowhere"), None);
    }

    #[test]
    fn bottom_bar_screens() {
        let tabs: Vec<&str> = Screen::all()
            .iter()
            .filter(|s| s.is_bottom_bar())
            .map(|s| s.name())
            .collect();
        assert_eq!(tabs, vec!["home", "history", "shop", "trade"]);
    }

    #[test]
    fn placeholders_in_order() {
        assert_eq!(Screen::MetroPrice.placeholders(), vec!["metroCardNumber", "amount"]);
        assert_eq!(Screen::CrowdFundingPayment.placeholders(), vec!["name", "amount"]);
        assert!(Screen::Home.placeholders().is_empty());
    }

    #[test]
    fn missing_argument_is_invalid() {
        let err = Screen::AddMoney.resolve(RouteArgs::new()).unwrap_err();
        assert!(matches!(err, NavError::InvalidRoute { .. }));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn unexpected_argument_is_invalid() {
        let err = Screen::Home
            .resolve(route_args([("amount", "5")]))
            .unwrap_err();
        assert!(err.to_string().contains("unexpected"));
    }

    #[test]
    fn empty_and_slashed_values_are_invalid() {
        assert!(Screen::AddMoney.resolve(route_args([("name", "")])).is_err());
        assert!(Screen::AddMoney.resolve(route_args([("name", "a/b")])).is_err());
    }

    #[test]
    fn values_are_plain_strings() {
        let route = Screen::FinalTrading
            .resolve(route_args([("amount", "not-a-number")]))
            .unwrap();
        assert_eq!(route.arg("amount"), Some("not-a-number"));
    }

    #[test]
    fn resolved_path_substitutes_values() {
        let route = Screen::MetroPrice
            .resolve(route_args([("metroCardNumber", "12345"), ("amount", "200")]))
            .unwrap();
        assert_eq!(route.path(), "metro_price/12345/200");
        assert_eq!(route.arg("metroCardNumber"), Some("12345"));
        assert_eq!(route.arg("amount"), Some("200"));
    }

    #[test]
    fn parse_concrete_path() {
        let route = ResolvedRoute::parse("crowdfunding_payment/Asha/500").unwrap();
        assert_eq!(route.screen, Screen::CrowdFundingPayment);
        assert_eq!(route.arg("name"), Some("Asha"));
        assert_eq!(route.arg("amount"), Some("500"));

        let home = ResolvedRoute::parse("/home/").unwrap();
        assert_eq!(home.screen, Screen::Home);
    }

    #[test]
    fn parse_rejects_wrong_arity_and_unknown() {
        assert!(matches!(
            ResolvedRoute::parse("add_money"),
            Err(NavError::InvalidRoute { .. })
        ));
        assert!(matches!(
            ResolvedRoute::parse("home/extra"),
            Err(NavError::InvalidRoute { .. })
        ));
        assert!(matches!(
            ResolvedRoute::parse("moon_base"),
            Err(NavError::UnknownRoute(_))
        ));
    }

    #[test]
    fn screen_serializes_as_template() {
        let json = serde_json::to_string(&Screen::AddMoney).unwrap();
        assert_eq!(json, "\"add_money/{name}\"");
    }
}
