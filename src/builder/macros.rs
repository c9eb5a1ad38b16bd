//! Macros for ergonomic state and graph construction.

/// Declare a state enum with the derives the [`State`](crate::core::State)
/// trait needs, a `Display` impl, and optionally its transition graph.
///
/// # Example
///
/// ```
/// use statewarden::state_enum;
///
/// state_enum! {
///     pub enum Workflow {
///         Draft,
///         Review,
///         Approved,
///     }
///     transitions: [Draft => Review, Review => Approved, Review => Draft]
/// }
///
/// let graph = Workflow::transition_graph();
/// assert!(graph.is_allowed_transition(&Workflow::Review, &Workflow::Draft));
/// assert!(graph.is_final_state(&Workflow::Approved));
/// assert_eq!(Workflow::Review.to_string(), "Review");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(transitions: [$($from:ident => $to:ident),+ $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => stringify!($variant)),*
                })
            }
        }

        $(
            impl $name {
                /// Graph of the transitions declared alongside the enum.
                $vis fn transition_graph() -> $crate::core::TransitionGraph<Self> {
                    $crate::core::TransitionGraph::from_transitions([
                        $((Self::$from, Self::$to)),+
                    ])
                }
            }
        )?
    };
}

/// Build a [`TransitionGraph`](crate::core::TransitionGraph) from
/// `from => to` pairs.
///
/// # Example
///
/// ```
/// use statewarden::transition_graph;
///
/// let graph = transition_graph! {
///     1u8 => 2u8,
///     2u8 => 3u8,
/// };
/// assert_eq!(graph.len(), 2);
/// assert!(graph.is_final_state(&3));
/// ```
#[macro_export]
macro_rules! transition_graph {
    ($($from:expr => $to:expr),+ $(,)?) => {{
        let graph = $crate::core::TransitionGraph::new();
        $(graph.add_allowed_transition($from, $to);)+
        graph
    }};
}
