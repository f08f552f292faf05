use seforim_derive::attribute_impl;

#[attribute_impl(implements(Token), constructor = "build")]
pub struct TokenImpl;

fn main() {}
