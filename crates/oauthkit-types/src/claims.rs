//! OpenID Connect claims (OIDC Core §5)
//!
//! Standard claim names, the `claims` request parameter (§5.5) and the
//! UserInfo response members this crate reads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::issuer::IssuerIdentifier;
use crate::macros::wire_enum;
use crate::resolve::{Candidate, ResolveError, resolve_ordered};
use crate::token::Audience;

wire_enum! {
    /// Standard claim names
    pub enum ClaimName {
        /// Time of the last authentication, seconds since epoch
        AuthTime => "auth_time",
        /// Replay protection value from the request
        Nonce => "nonce",
        /// Authentication context class reference
        Acr => "acr",
        /// Full name
        Name => "name",
        /// Surname
        FamilyName => "family_name",
        /// First name
        GivenName => "given_name",
        /// Middle name
        MiddleName => "middle_name",
        /// Casual name
        Nickname => "nickname",
        /// Shorthand name the user wishes to be referred to by
        PreferredUsername => "preferred_username",
        /// Gender
        Gender => "gender",
        /// Profile picture URL
        Picture => "picture",
        /// Profile page URL
        Profile => "profile",
        /// Web page or blog URL
        Website => "website",
        /// Birthday
        Birthdate => "birthdate",
        /// IANA time zone
        Zoneinfo => "zoneinfo",
        /// BCP47 language tag
        Locale => "locale",
        /// Last profile update, seconds since epoch
        UpdatedAt => "updated_at",
        /// Preferred e-mail address
        Email => "email",
        /// Whether the e-mail address was verified
        EmailVerified => "email_verified",
        /// Preferred telephone number
        PhoneNumber => "phone_number",
        /// Whether the phone number was verified
        PhoneNumberVerified => "phone_number_verified",
        /// Postal address
        Address => "address",
    }
}

impl ClaimName {
    /// Whether the claim is released under the `profile` scope
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::FamilyName
                | Self::GivenName
                | Self::MiddleName
                | Self::Nickname
                | Self::PreferredUsername
                | Self::Gender
                | Self::Picture
                | Self::Profile
                | Self::Website
                | Self::Birthdate
                | Self::Zoneinfo
                | Self::Locale
                | Self::UpdatedAt
        )
    }
}

wire_enum! {
    /// Where a requested claim is returned
    pub enum EntityType {
        /// The UserInfo endpoint
        UserInfo => "userinfo",
        /// The ID token
        IdToken => "id_token",
    }
}

/// A claim value in a `claims` request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClaimsValue {
    /// String value
    String(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
}

impl ClaimsValue {
    const CANDIDATES: &'static [Candidate<Value, ClaimsValue>] = &[
        Candidate {
            name: "string",
            attempt: |value| value.as_str().map(|s| ClaimsValue::String(s.to_string())),
        },
        Candidate {
            name: "number",
            attempt: |value| value.as_f64().map(ClaimsValue::Number),
        },
        Candidate {
            name: "boolean",
            attempt: |value| value.as_bool().map(ClaimsValue::Boolean),
        },
    ];

    /// Resolve a JSON value as a string, then a number, then a boolean
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NoMatch`] for null, arrays and objects.
    pub fn from_value(value: &Value) -> Result<Self, ResolveError> {
        resolve_ordered("ClaimsValue", value, Self::CANDIDATES)
    }
}

impl<'de> Deserialize<'de> for ClaimsValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// How a single claim is requested (OIDC Core §5.5.1)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimsProperties {
    /// Whether the claim is essential to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essential: Option<bool>,

    /// Required value
    ///
    /// Numbers and booleans are accepted as well as strings, the same as `values`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ClaimsValue>,

    /// Acceptable values, in order of preference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ClaimsValue>>,
}

/// The `claims` request parameter
///
/// Each claim maps to `null` for a plain request or to [`ClaimsProperties`].
/// Claim names are kept as strings since providers define their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimsRequest {
    /// Claims returned from the UserInfo endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub userinfo: Option<BTreeMap<String, Option<ClaimsProperties>>>,

    /// Claims returned in the ID token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_token: Option<BTreeMap<String, Option<ClaimsProperties>>>,
}

impl ClaimsRequest {
    /// Claims requested for one destination
    pub fn claims_for(&self, entity: EntityType) -> Option<&BTreeMap<String, Option<ClaimsProperties>>> {
        match entity {
            EntityType::UserInfo => self.userinfo.as_ref(),
            EntityType::IdToken => self.id_token.as_ref(),
        }
    }

    /// Whether `claim` is requested for `entity`, with or without properties
    pub fn requests(&self, entity: EntityType, claim: ClaimName) -> bool {
        self.claims_for(entity)
            .is_some_and(|claims| claims.contains_key(claim.as_str()))
    }

    /// Whether `claim` is marked essential for `entity`
    pub fn is_essential(&self, entity: EntityType, claim: ClaimName) -> bool {
        self.claims_for(entity)
            .and_then(|claims| claims.get(claim.as_str()))
            .and_then(|props| props.as_ref())
            .and_then(|props| props.essential)
            .unwrap_or(false)
    }
}

/// UserInfo response members (OIDC Core §5.3.2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Subject identifier
    pub sub: String,

    /// Issuer, present when the response is a signed JWT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<IssuerIdentifier>,

    /// Audience, present when the response is a signed JWT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// E-mail address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether the e-mail address was verified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Preferred username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,

    /// Profile picture URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}
