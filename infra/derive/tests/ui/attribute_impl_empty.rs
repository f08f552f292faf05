use seforim_derive::attribute_impl;

#[attribute_impl(implements())]
pub struct TokenImpl;

fn main() {}
