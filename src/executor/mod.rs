//! The four query operators (§4.4): filter, group, recommend, suggest.
//! Each consumes already-validated parameters and produces deterministic
//! results with no further error path — malformed input never reaches
//! this layer (§7).

mod filter;
mod group;
mod recommend;
mod suggest;
mod view;

pub use filter::execute_filter;
pub use group::{execute_group, GroupKey, GroupPredicate, GroupQuery, GroupRow, Order};
pub use recommend::{execute_recommend, RecommendQuery};
pub use suggest::{execute_suggest, SuggestQuery};
pub use view::{materialize, AccountView, PremiumView};
