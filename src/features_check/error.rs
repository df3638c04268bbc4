compile_error! {
    "bigint requires that either `std` (default) or `alloc` feature is enabled"
}
