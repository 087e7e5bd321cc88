//! Search endpoints under `/cats`, one per accepted combination of query parameters.
//!
//! ```text
//! GET /cats?term=photos               -> "photos"
//! GET /cats?term=photos&format=png    -> ["photos","png"]
//! GET /cats?amount=50                 -> 50
//! GET /cats?format=gif&orderBy=new    -> ["gif","new"]
//! ```

use crate::dispatch::RouteTable;
use crate::error::DispatchError;
use crate::models::route::{Args, ParamType, Reply, Route};

pub const PATH: &str = "cats";

pub fn register(table: &mut RouteTable) -> Result<(), DispatchError> {
    table.register(Route::get(PATH, search_term).param("term", ParamType::Text))?;
    table.register(
        Route::get(PATH, search_term_and_format)
            .param("term", ParamType::Text)
            .param("format", ParamType::Text),
    )?;
    table.register(Route::get(PATH, amount).param("amount", ParamType::Integer))?;
    table.register(
        Route::get(PATH, format_and_order_by)
            .param("format", ParamType::Text)
            .param("orderBy", ParamType::Text),
    )?;
    Ok(())
}

pub fn search_term(mut args: Args) -> Result<Reply, DispatchError> {
    Ok(Reply::Text(args.text("term")?))
}

pub fn search_term_and_format(mut args: Args) -> Result<Reply, DispatchError> {
    Ok(Reply::Texts(vec![args.text("term")?, args.text("format")?]))
}

pub fn amount(mut args: Args) -> Result<Reply, DispatchError> {
    Ok(Reply::Integer(args.integer("amount")?))
}

pub fn format_and_order_by(mut args: Args) -> Result<Reply, DispatchError> {
    Ok(Reply::Texts(vec![args.text("format")?, args.text("orderBy")?]))
}
