//! Nginx Log Statistics
//!
//! Counts computed by the server over the nginx log collection, rendered as
//! the plain-text report printed by the `log_stats` binaries.

use std::fmt;

use mongodb::bson::{self, doc};
use serde::Deserialize;
use tracing::debug;

use crate::docs::DocumentCollection;
use crate::error::{Error, Result};

/// Methods reported, in print order.
pub const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Number of addresses in the top IPs section.
pub const TOP_IPS_LIMIT: i64 = 10;

/// Request count for one client address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpCount {
    /// Null for log entries without an address
    #[serde(rename = "_id")]
    pub ip: Option<String>,
    pub count: i64,
}

// == Log Stats ==
/// Summary of the nginx log collection.
#[derive(Debug, Clone, PartialEq)]
pub struct LogStats {
    pub total: u64,
    /// Per-method counts in `HTTP_METHODS` order
    pub methods: Vec<(&'static str, u64)>,
    /// `GET /status` requests
    pub status_checks: u64,
    /// Busiest addresses, when requested
    pub top_ips: Option<Vec<IpCount>>,
}

impl LogStats {
    // == Collect ==
    /// Queries the collection for every count; `with_top_ips` adds the
    /// grouped top-address aggregation.
    pub async fn collect(collection: &dyn DocumentCollection, with_top_ips: bool) -> Result<Self> {
        let total = collection.count_documents(doc! {}).await?;

        let mut methods = Vec::with_capacity(HTTP_METHODS.len());
        for method in HTTP_METHODS {
            let count = collection.count_documents(doc! { "method": method }).await?;
            methods.push((method, count));
        }

        let status_checks = collection
            .count_documents(doc! { "method": "GET", "path": "/status" })
            .await?;

        let top_ips = if with_top_ips {
            Some(Self::top_ips(collection).await?)
        } else {
            None
        };

        debug!("Collected stats over {} logs", total);
        Ok(Self {
            total,
            methods,
            status_checks,
            top_ips,
        })
    }

    async fn top_ips(collection: &dyn DocumentCollection) -> Result<Vec<IpCount>> {
        let pipeline = vec![
            doc! { "$group": { "_id": "$ip", "count": { "$sum": 1 } } },
            doc! { "$sort": { "count": -1 } },
            doc! { "$limit": TOP_IPS_LIMIT },
        ];

        collection
            .aggregate(pipeline)
            .await?
            .into_iter()
            .map(|group| bson::from_document(group).map_err(|err| Error::Decode(err.to_string())))
            .collect()
    }
}

impl fmt::Display for LogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} logs", self.total)?;
        for (method, count) in &self.methods {
            writeln!(f, "\tmethod {}: {}", method, count)?;
        }
        writeln!(f, "{} status check", self.status_checks)?;

        if let Some(top_ips) = &self.top_ips {
            writeln!(f, "IPs:")?;
            for entry in top_ips {
                writeln!(f, "\t{}: {}", entry.ip.as_deref().unwrap_or("null"), entry.count)?;
            }
        }
        Ok(())
    }
}
