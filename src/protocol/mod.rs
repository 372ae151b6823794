//! Protocol Module
//!
//! Time-series request and response messages on top of the term encoding.
//! Every message is the version marker followed by one tuple.
//!
//! ### Requests
//! - GET:   `{tsgetreq, Table, [Key...], Timeout}`
//! - QUERY: `{tsqueryreq, {tsinterpolation, Query, []}, false, undefined}`
//! - PUT:   `{tsputreq, Table, [], [{Cell...}...]}`
//!
//! ### Responses
//! - `{tsgetresp, {[Name...], [Type...], [{Cell...}...]}}`
//! - `{tsqueryresp, {[Name...], [Type...], [{Cell...}...]}}`
//! - `tsputresp`
//! - `{rpberrorresp, Message, Code}`

mod codec;
mod request;
mod response;

pub use codec::{
    decode_get_response, decode_put_response, decode_query_response, encode_get, encode_put,
    encode_query, Codec,
};
