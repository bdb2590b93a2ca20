/*
[INPUT]:  Stream kind, optional venue, optional stock, held account
[OUTPUT]: WebSocket channel URL for one subscription
[POS]:    WebSocket layer - channel selection
[UPDATE]: When the stream URL layout changes
*/

use url::Url;

use crate::http::{Result, StockfighterError};
use crate::types::StreamKind;

/// What a subscription listens to.
///
/// No venue means the global stream; a venue without a stock means the
/// venue-wide stream; a stock narrows to one symbol and requires a venue.
///
/// The client's held account is also part of the stream URL, so
/// `set_account` changes the URL of subscriptions opened afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionParams {
    pub kind: StreamKind,
    pub venue: Option<String>,
    pub stock: Option<String>,
}

impl SubscriptionParams {
    pub fn tickertape() -> Self {
        Self::default()
    }

    pub fn executions() -> Self {
        Self {
            kind: StreamKind::Executions,
            ..Self::default()
        }
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    /// `{base}/{account}/venues/{venue}/{kind}/stocks/{stock}`, dropping the
    /// parts that were not supplied.
    pub fn channel_url(&self, base_stream_url: &str, account: Option<&str>) -> Result<Url> {
        let venue = non_blank("venue", self.venue.as_deref())?;
        let stock = non_blank("stock", self.stock.as_deref())?;
        if stock.is_some() && venue.is_none() {
            return Err(StockfighterError::validation(
                "stock",
                "a stock stream needs a venue",
            ));
        }

        let mut url = Url::parse(base_stream_url)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                StockfighterError::Config(format!(
                    "stream URL cannot carry a path: {base_stream_url}"
                ))
            })?;
            segments.pop_if_empty();
            if let Some(account) = account.filter(|account| !account.trim().is_empty()) {
                segments.push(account);
            }
            if let Some(venue) = venue {
                segments.extend(["venues", venue]);
            }
            segments.push(self.kind.as_str());
            if let Some(stock) = stock {
                segments.extend(["stocks", stock]);
            }
        }
        Ok(url)
    }
}

fn non_blank<'a>(field: &'static str, value: Option<&'a str>) -> Result<Option<&'a str>> {
    match value {
        Some(value) if value.trim().is_empty() => {
            Err(StockfighterError::validation(field, "must not be empty"))
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "wss://api.stockfighter.io/ob/api/ws";

    #[rstest]
    #[case(SubscriptionParams::tickertape(), "/ob/api/ws/EXB123456/tickertape")]
    #[case(
        SubscriptionParams::tickertape().with_venue("TESTEX"),
        "/ob/api/ws/EXB123456/venues/TESTEX/tickertape"
    )]
    #[case(
        SubscriptionParams::tickertape().with_venue("TESTEX").with_stock("FOOBAR"),
        "/ob/api/ws/EXB123456/venues/TESTEX/tickertape/stocks/FOOBAR"
    )]
    #[case(SubscriptionParams::executions(), "/ob/api/ws/EXB123456/executions")]
    #[case(
        SubscriptionParams::executions().with_venue("TESTEX"),
        "/ob/api/ws/EXB123456/venues/TESTEX/executions"
    )]
    #[case(
        SubscriptionParams::executions().with_venue("TESTEX").with_stock("FOOBAR"),
        "/ob/api/ws/EXB123456/venues/TESTEX/executions/stocks/FOOBAR"
    )]
    fn path_narrows_with_supplied_parameters(
        #[case] params: SubscriptionParams,
        #[case] expected: &str,
    ) {
        let url = params.channel_url(BASE, Some("EXB123456")).expect("channel url");
        assert_eq!(url.path(), expected);
        assert_eq!(url.scheme(), "wss");
    }

    #[test]
    fn account_segment_is_omitted_when_none_is_held() {
        let url = SubscriptionParams::tickertape()
            .with_venue("TESTEX")
            .channel_url(BASE, None)
            .expect("channel url");
        assert_eq!(url.path(), "/ob/api/ws/venues/TESTEX/tickertape");
    }

    #[test]
    fn stock_without_venue_is_rejected() {
        let result = SubscriptionParams::tickertape()
            .with_stock("FOOBAR")
            .channel_url(BASE, Some("EXB123456"));
        assert!(matches!(
            result,
            Err(StockfighterError::Validation { field: "stock", .. })
        ));
    }

    #[test]
    fn blank_venue_is_rejected() {
        let result = SubscriptionParams::executions()
            .with_venue(" ")
            .channel_url(BASE, None);
        assert!(matches!(
            result,
            Err(StockfighterError::Validation { field: "venue", .. })
        ));
    }
}
