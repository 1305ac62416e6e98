/// Generic syntax tree module
/// Contains the uniform tree produced by the parser and its side metadata
///
/// Submodules:
/// - node: The leaf/list `Node` and the `SyntaxTree` handed to the type checker
/// - tags: The tag store holding per-node category and source position
/// - types: Javalette value types and operators
pub mod node;
pub mod tags;
pub mod types;
