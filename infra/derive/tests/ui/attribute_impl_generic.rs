use seforim_derive::attribute_impl;

#[attribute_impl(implements(Token))]
pub struct TokenImpl<T>(T);

fn main() {}
