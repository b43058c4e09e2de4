mod helpers;

mod api_test;
mod ledger_test;
mod search_test;
mod store_test;
