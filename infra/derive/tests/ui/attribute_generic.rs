use seforim_derive::attribute;

#[attribute]
pub trait Scored<T> {}

fn main() {}
