use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{LitFloat, LitInt, Token, parenthesized, parse_macro_input};

/// Creates a `CubicBezier` at compile time from four `(x, y)` literals.
///
/// The points are, in order: start, first control point, second control
/// point, end. The macro checks that x never decreases along that chain,
/// which keeps the sampled table sorted by x so lookups behave. A curve
/// that fails the check is a compile error.
///
/// # Format
///
/// `bezier!((x0, y0), (x1, y1), (x2, y2), (x3, y3))` where every coordinate
/// is an integer or float literal, optionally negated.
///
/// # Examples
///
/// ```ignore
/// use haptic_dynamics::bezier;
///
/// // The bow-drag curve
/// let curve = bezier!((0, 0), (89, 73.95), (99, 140.25), (100, 255));
///
/// // Negative coordinates are fine as long as x rises
/// let centered = bezier!((-50, -1.0), (-10, 0), (10, 0), (50, 1.0));
/// ```
#[proc_macro]
pub fn bezier(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as CurveLiteral);

    match check_monotonic(&input.points) {
        Ok(()) => {
            let [p0, p1, p2, p3] = input.points.map(|(x, y)| {
                quote! { haptic_dynamics::curves::ControlPoint::new(#x, #y) }
            });

            let expanded = quote! {
                {
                    haptic_dynamics::curves::CubicBezier::new(#p0, #p1, #p2, #p3)
                }
            };

            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid bezier curve: {}", e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

struct CurveLiteral {
    points: [(f64, f64); 4],
}

impl Parse for CurveLiteral {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut points = [(0.0, 0.0); 4];
        for (i, slot) in points.iter_mut().enumerate() {
            if i > 0 {
                input.parse::<Token![,]>()?;
            }
            *slot = parse_point(input)?;
        }
        // Allow a trailing comma
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("expected exactly four points"));
        }
        Ok(Self { points })
    }
}

fn parse_point(input: ParseStream) -> syn::Result<(f64, f64)> {
    let content;
    parenthesized!(content in input);
    let x = parse_number(&content)?;
    content.parse::<Token![,]>()?;
    let y = parse_number(&content)?;
    if !content.is_empty() {
        return Err(content.error("a point has exactly two coordinates"));
    }
    Ok((x, y))
}

fn parse_number(input: ParseStream) -> syn::Result<f64> {
    let negative = if input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        true
    } else {
        false
    };

    let magnitude = if input.peek(LitFloat) {
        input.parse::<LitFloat>()?.base10_parse::<f64>()?
    } else if input.peek(LitInt) {
        input.parse::<LitInt>()?.base10_parse::<f64>()?
    } else {
        return Err(input.error("expected a numeric literal"));
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn check_monotonic(points: &[(f64, f64); 4]) -> Result<(), String> {
    const NAMES: [&str; 4] = ["start", "control1", "control2", "end"];

    for (i, pair) in points.windows(2).enumerate() {
        let (a, b) = (pair[0].0, pair[1].0);
        if b < a {
            return Err(format!(
                "x must not decrease, but {} x = {} is less than {} x = {}",
                NAMES[i + 1],
                b,
                NAMES[i],
                a
            ));
        }
    }
    Ok(())
}
