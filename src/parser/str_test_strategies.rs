use proptest::prelude::*;


pub(crate) fn simple_number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..=1000).prop_map(|n| n.to_string()),
        (0u32..=1000, 1u32..=99).prop_map(|(int, frac)| format!("{int}.{frac}")),
    ]
}

pub(crate) fn simple_dice_strategy() -> impl Strategy<Value = String> {
    (1u32..=100, 1u32..=100).prop_map(|(amount, faces)| format!("{amount}d{faces}"))
}

pub(crate) fn parenthesized_strategy(inner: impl Strategy<Value = String>) -> impl Strategy<Value = String> {
    inner.prop_map(|expr| format!("({expr})"))
}

pub(crate) fn binary_operation_strategy(
    left: impl Strategy<Value = String>,
    right: impl Strategy<Value = String>
) -> impl Strategy<Value = String> {
    (
        left,
        prop_oneof![Just("+"), Just("-"), Just("*"), Just("/")],
        right
    ).prop_map(|(l, op, r)| format!("{l} {op} {r}"))
}

/// Well formed infix dice expressions: balanced, every operator between two operands.
pub(crate) fn dice_expression_strategy() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        simple_number_strategy(),
        simple_dice_strategy(),
    ];

    leaf.prop_recursive(4, 32, 10, |inner| {
        prop_oneof![
            parenthesized_strategy(inner.clone()),
            binary_operation_strategy(inner.clone(), inner),
        ]
    })
}

/// Well formed infix expressions without dice, so they evaluate deterministically.
pub(crate) fn constant_expression_strategy() -> impl Strategy<Value = String> {
    let leaf = (1u32..=100).prop_map(|n| n.to_string());

    leaf.prop_recursive(4, 32, 10, |inner| {
        prop_oneof![
            parenthesized_strategy(inner.clone()),
            binary_operation_strategy(inner.clone(), inner),
        ]
    })
}
