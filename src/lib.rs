/*
 *  SteamLadder bot - Discord bot for looking up SteamLadder profiles within Discord.
 *  Copyright (C) 2025  Manuel de Castro
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
/*
 * The crate is a library only to host the `log_cmd` procedural macro; proc-macros must live in
 * their own compilation unit.
 */
extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use quote::ToTokens as _;
use syn::spanned::Spanned as _;
use syn::{parse_macro_input, Ident, ItemFn};

/// Finds the identifier of the context argument (the first argument) of a poise command.
fn context_ident(function: &ItemFn) -> Result<Ident, syn::Error> {
    let Some(first_arg) = function.sig.inputs.first() else {
        return Err(syn::Error::new(
            function.sig.span(),
            "[log_cmd] command must take the poise context as its first argument",
        ));
    };

    let syn::FnArg::Typed(ctx_arg) = first_arg else {
        return Err(syn::Error::new(
            first_arg.span(),
            "[log_cmd] `self` argument is not allowed",
        ));
    };

    match &*ctx_arg.pat {
        syn::Pat::Ident(ident) => Ok(ident.ident.clone()),
        other => Err(syn::Error::new(
            other.span(),
            "[log_cmd] expected an identifier for the context argument",
        )),
    }
}

/// Logs every invocation of the annotated command, together with its author.
///
/// Expands to a call to `crate::utils::log_cmd!` as the first statement of the command body, so
/// the binary decides how the event is recorded.
#[proc_macro_attribute]
pub fn log_cmd(_macro_attrs: TokenStream, function: TokenStream) -> TokenStream {
    let mut function = parse_macro_input!(function as ItemFn);

    let ctx_ident = match context_ident(&function) {
        Ok(ident) => ident,
        Err(e) => return darling::Error::from(e).write_errors().into(),
    };

    let log_stmt = match syn::parse2::<syn::Stmt>(quote! {
        crate::utils::log_cmd!(#ctx_ident);
    }) {
        Ok(stmt) => stmt,
        Err(e) => return darling::Error::from(e).write_errors().into(),
    };
    function.block.stmts.insert(0, log_stmt);

    function.into_token_stream().into()
}
