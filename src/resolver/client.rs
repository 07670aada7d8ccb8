// client.rs
use rand::Rng;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::domain::models::{LotIdentifierMatch, ResolvedAddress};
use crate::resolver::escalation::{EscalationDecision, FailureEscalation};
use crate::resolver::models::{AddressAttributes, FeatureSet, LotAttributes};
use crate::resolver::{AddressResolver, ResolverError};

const USER_AGENT: &str = "gpr-address-update/0.1";

// The GURAS endpoints reject over-long URLs, so keys go out in batches.
const BATCH_SIZE: usize = 200;
const MAX_RETRIES: u32 = 10;

// Spacing between lot-service batches; without it the REST service starts
// timing out under sustained querying.
const LOT_BATCH_DELAY: Duration = Duration::from_secs(2);

const LOT_SERVICE_NAME: &str = "PropID GURAS Service";
const ADDRESS_SERVICE_NAME: &str = "GURAS Address Service";

/// Client for the two GURAS lookup services: composite lot string to
/// property identifier, and property identifier to principal address.
pub struct GurasClient {
    client: Client,
    lot_url: String,
    address_url: String,
    escalation: Box<dyn FailureEscalation>,
}

impl GurasClient {
    pub fn new(
        config: &Config,
        escalation: Box<dyn FailureEscalation>,
    ) -> Result<Self, ResolverError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(360))
            .build()
            .map_err(|e| ResolverError::Network(e.to_string()))?;

        Ok(Self {
            client,
            lot_url: config.lot_service_url.clone(),
            address_url: config.address_service_url.clone(),
            escalation,
        })
    }

    /// Issues one GET against an ArcGIS query endpoint, retrying transport
    /// failures up to the bound and escalating persistent failures and bad
    /// statuses to the policy. `Retry` restarts the counter from zero;
    /// `Abort` surfaces as `ResolverError::Aborted`.
    fn query_features<T: DeserializeOwned>(
        &self,
        url: &str,
        out_fields: &str,
        where_clause: &str,
        service: &str,
    ) -> Result<FeatureSet<T>, ResolverError> {
        let params = [
            ("f", "json"),
            ("returnGeometry", "false"),
            ("OutFields", out_fields),
            ("where", where_clause),
        ];

        let mut retries = 0;
        loop {
            match self.client.get(url).query(&params).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if !status.is_success() {
                        eprintln!("⚠️ {service} returned HTTP {status}");
                        match self.escalation.on_bad_response(service, status.as_u16()) {
                            EscalationDecision::Retry => {
                                retries = 0;
                                continue;
                            }
                            EscalationDecision::Abort => return Err(ResolverError::Aborted),
                        }
                    }

                    let text = resp
                        .text()
                        .map_err(|e| ResolverError::Network(e.to_string()))?;
                    return serde_json::from_str(&text)
                        .map_err(|e| ResolverError::JsonParse(e.to_string()));
                }
                Err(e) => {
                    retries += 1;
                    eprintln!("⚠️ {service} request failed (attempt {retries}): {e}");

                    if retries >= MAX_RETRIES {
                        match self.escalation.on_retries_exhausted(service) {
                            EscalationDecision::Retry => retries = 0,
                            EscalationDecision::Abort => return Err(ResolverError::Aborted),
                        }
                    } else {
                        let jitter = rand::thread_rng().gen_range(0..=2);
                        std::thread::sleep(Duration::from_secs(1 + jitter));
                    }
                }
            }
        }
    }
}

impl AddressResolver for GurasClient {
    fn resolve_lot_identifiers(
        &self,
        lot_keys: &[String],
    ) -> Result<Vec<LotIdentifierMatch>, ResolverError> {
        let mut matches = Vec::new();

        for batch in lot_keys.chunks(BATCH_SIZE) {
            let quoted: Vec<String> = batch.iter().map(|k| format!("'{k}'")).collect();
            let where_clause = format!("ptlotsecpn in ({})", quoted.join(","));

            let result: FeatureSet<LotAttributes> = self.query_features(
                &self.lot_url,
                "ptlotsecpn,propid,sppropid",
                &where_clause,
                LOT_SERVICE_NAME,
            )?;

            matches.extend(
                result
                    .features
                    .iter()
                    .filter_map(|f| LotIdentifierMatch::from_attributes(&f.attributes)),
            );

            std::thread::sleep(LOT_BATCH_DELAY);
        }

        Ok(matches)
    }

    fn resolve_addresses(&self, prop_ids: &[i64]) -> Result<Vec<ResolvedAddress>, ResolverError> {
        let mut addresses = Vec::new();

        for batch in prop_ids.chunks(BATCH_SIZE) {
            let ids: Vec<String> = batch.iter().map(|id| id.to_string()).collect();
            // Alternate and historical representations are filtered out
            // server-side; only the principal address survives.
            let where_clause = format!(
                "propid in ({}) and principaladdresstype = 1",
                ids.join(",")
            );

            let result: FeatureSet<AddressAttributes> = self.query_features(
                &self.address_url,
                "*",
                &where_clause,
                ADDRESS_SERVICE_NAME,
            )?;

            addresses.extend(
                result
                    .features
                    .iter()
                    .map(|f| ResolvedAddress::from_attributes(&f.attributes)),
            );
        }

        Ok(addresses)
    }
}
