use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 没有小数位的货币
const ZERO_DECIMAL_CURRENCIES: &[&str] = &[
    "CVE", "DJF", "GNF", "IDR", "JPY", "KMF", "KRW", "PYG", "RWF", "UGX", "VND", "VUV", "XAF",
    "XOF", "XPF",
];

/// 三位小数的货币
const THREE_DECIMAL_CURRENCIES: &[&str] = &["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// 货币的小数位数（最小单位的指数）
pub fn decimals(currency_iso: &str) -> u32 {
    let iso = currency_iso.to_ascii_uppercase();
    if ZERO_DECIMAL_CURRENCIES.contains(&iso.as_str()) {
        0
    } else if THREE_DECIMAL_CURRENCIES.contains(&iso.as_str()) {
        3
    } else {
        2
    }
}

/// 将主单位金额转换为最小单位整数（四舍五入）
pub fn sanitize(amount: Decimal, currency_iso: &str) -> DomainResult<i64> {
    let exponent = decimals(currency_iso);
    let scale = Decimal::from(10_i64.pow(exponent));

    amount
        .round_dp_with_strategy(exponent, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(scale)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(|| {
            DomainError::InvalidAmount(format!("{} {} is out of range", amount, currency_iso))
        })
}

/// 将最小单位整数转换回主单位金额
pub fn to_major_units(amount: i64, currency_iso: &str) -> Decimal {
    Decimal::new(amount, decimals(currency_iso))
}

/// 按语言区域格式化最小单位金额，例如 `€1,234.56` 或 `1.234,56 €`
pub fn format_minor_units(amount: i64, currency_iso: &str, locale: &str) -> String {
    let exponent = decimals(currency_iso);
    let divisor = 10_u64.pow(exponent);
    let absolute = amount.unsigned_abs();
    let integer_part = (absolute / divisor).to_string();
    let fraction_part = absolute % divisor;

    let style = LocaleStyle::for_locale(locale);
    let mut number = group_thousands(&integer_part, style.group_separator);
    if exponent > 0 {
        number.push(style.decimal_separator);
        number.push_str(&format!("{:0width$}", fraction_part, width = exponent as usize));
    }

    let symbol = currency_symbol(currency_iso);
    let sign = if amount < 0 { "-" } else { "" };
    match style.symbol_position {
        SymbolPosition::Prefix => format!("{}{}{}", sign, symbol, number),
        SymbolPosition::PrefixSpaced => format!("{}{} {}", sign, symbol, number),
        SymbolPosition::Suffix => format!("{}{} {}", sign, number, symbol),
    }
}

fn currency_symbol(currency_iso: &str) -> String {
    match currency_iso.to_ascii_uppercase().as_str() {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => other.to_string(),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Prefix,
    PrefixSpaced,
    Suffix,
}

#[derive(Debug, Clone, Copy)]
struct LocaleStyle {
    decimal_separator: char,
    group_separator: char,
    symbol_position: SymbolPosition,
}

impl LocaleStyle {
    fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "de" | "es" | "it" | "pt" => Self {
                decimal_separator: ',',
                group_separator: '.',
                symbol_position: SymbolPosition::Suffix,
            },
            "fr" => Self {
                decimal_separator: ',',
                group_separator: ' ',
                symbol_position: SymbolPosition::Suffix,
            },
            "nl" => Self {
                decimal_separator: ',',
                group_separator: '.',
                symbol_position: SymbolPosition::PrefixSpaced,
            },
            _ => Self {
                decimal_separator: '.',
                group_separator: ',',
                symbol_position: SymbolPosition::Prefix,
            },
        }
    }
}
