//! Top-level XML document handling shared by the decoders.
//!
//! The service reports credential problems and outages as a `200 OK` with a
//! different document (`<string>Invalid credentials</string>`, an HTML error
//! page). Every wire field is optional, so such a body would deserialize into
//! an empty response. The root element is checked first to tell them apart.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::de::DeserializeOwned;

use super::error::FeedError;
use super::types::{
    StationListResponse, StationScheduleResponse, TrainMapResponse, TrainStopsResponse,
    VehicleDataResponse,
};

/// A response DTO for a whole XML document.
pub(crate) trait FeedDocument: DeserializeOwned {
    /// Local name of the document's root element.
    const ROOT: &'static str;
}

impl FeedDocument for VehicleDataResponse {
    const ROOT: &'static str = "TRAINS";
}

impl FeedDocument for TrainMapResponse {
    const ROOT: &'static str = "Trains";
}

impl FeedDocument for TrainStopsResponse {
    const ROOT: &'static str = "Train";
}

impl FeedDocument for StationScheduleResponse {
    const ROOT: &'static str = "STATION";
}

impl FeedDocument for StationListResponse {
    const ROOT: &'static str = "STATIONS";
}

/// Deserialize an XML feed body into its DTO, rejecting foreign documents.
pub(crate) fn from_xml<T: FeedDocument>(body: &[u8]) -> Result<T, FeedError> {
    match root_element(body).map_err(|e| FeedError::xml(e, body))? {
        Some(root) if root == T::ROOT => {}
        Some(root) => {
            return Err(FeedError::xml(
                format!("expected <{}> document, found <{root}>", T::ROOT),
                body,
            ));
        }
        None => {
            return Err(FeedError::xml(
                format!("expected <{}> document, found no element", T::ROOT),
                body,
            ));
        }
    }

    quick_xml::de::from_reader(body).map_err(|e| FeedError::xml(e, body))
}

/// Local name of the first element in `body`, skipping the prolog.
fn root_element(body: &[u8]) -> Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) | Event::Empty(tag) => {
                let name = String::from_utf8_lossy(tag.local_name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_skips_prolog() {
        let body = b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!-- feed -->\n<TRAINS></TRAINS>";
        assert_eq!(root_element(body).unwrap().as_deref(), Some("TRAINS"));
    }

    #[test]
    fn root_ignores_namespace_prefix() {
        let body = b"<ns:STATIONS xmlns:ns=\"http://tempuri.org/\"></ns:STATIONS>";
        assert_eq!(root_element(body).unwrap().as_deref(), Some("STATIONS"));
    }

    #[test]
    fn root_of_empty_body_is_none() {
        assert_eq!(root_element(b"").unwrap(), None);
        assert_eq!(root_element(b"  \n").unwrap(), None);
    }

    #[test]
    fn service_error_string_is_rejected() {
        let body = b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
            <string xmlns=\"http://tempuri.org/\">Invalid credentials</string>";
        let err = from_xml::<VehicleDataResponse>(body).unwrap_err();
        let FeedError::Xml { message, .. } = err else {
            panic!("expected an XML error, got {err:?}");
        };
        assert_eq!(message, "expected <TRAINS> document, found <string>");
    }

    #[test]
    fn root_match_is_case_sensitive() {
        assert!(from_xml::<TrainMapResponse>(b"<TRAINS></TRAINS>").is_err());
        assert!(from_xml::<VehicleDataResponse>(b"<Trains></Trains>").is_err());
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = from_xml::<StationListResponse>(b"").unwrap_err();
        assert!(matches!(err, FeedError::Xml { .. }));
    }
}
