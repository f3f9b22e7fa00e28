use serde::{Deserialize, Deserializer, Serialize};

/// Everything the API knows about one IP address.
///
/// Fields the service could not resolve are `None`. An empty string from the
/// service stays `Some("")`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LookupResponse {
    pub ip: String,
    pub country: Option<String>,
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_eu: bool,
    pub city: Option<String>,
    pub continent: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_zone: Option<String>,
    pub postal_code: Option<String>,
    pub subdivision: Option<String>,
    pub currency_code: Option<String>,
    pub calling_code: Option<String>,
    pub network: Option<String>,
    pub asn: Option<Asn>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privacy: Privacy,
    pub company: Option<Company>,
    pub hosting: Option<Hosting>,
    pub abuse: Option<Abuse>,
}
impl LookupResponse {
    /// Latitude and longitude, only if the service resolved both.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Asn {
    pub asn: String,
    pub route: String,
    pub netname: String,
    pub name: String,
    pub country_code: String,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Regional Internet Registry, e.g. ARIN or RIPE.
    pub rir: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Privacy {
    #[serde(deserialize_with = "null_as_default")]
    pub is_abuser: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_anonymous: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bogon: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_hosting: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_icloud_relay: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_proxy: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_tor: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_vpn: bool,
}
impl Privacy {
    pub fn uses_privacy_tools(&self) -> bool {
        self.is_vpn || self.is_proxy || self.is_tor
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub domain: String,
    pub country_code: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Hosting {
    pub provider: Option<String>,
    pub domain: Option<String>,
    pub network: Option<String>,
    pub region: Option<String>,
    pub service: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Abuse {
    pub address: Option<String>,
    pub country_code: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub network: Option<String>,
    pub phone: Option<String>,
}

/// The service sends `null` for flags it has no data on, which reads as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
