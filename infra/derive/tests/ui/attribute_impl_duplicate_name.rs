use seforim_derive::attribute_impl;

#[attribute_impl(implements(Token), name = "a::TokenImpl", name = "b::TokenImpl")]
pub struct TokenImpl;

fn main() {}
