// ABOUTME: Symbol interning table — equal lexemes map to the identical object

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// An interned identifier. Equality is pointer identity, not text comparison —
/// this is what lets the evaluator recognize reserved words with a pointer
/// compare instead of a string compare on every dispatch.
#[derive(Clone, Debug)]
pub struct Symbol(Rc<str>);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

thread_local! {
    static TABLE: RefCell<HashMap<String, Symbol>> = RefCell::new(HashMap::new());
}

/// Intern a lexeme, returning the canonical Symbol for it. Repeated calls
/// with the same text return the same underlying `Rc<str>`.
pub fn intern(lexeme: &str) -> Symbol {
    TABLE.with(|table| {
        let mut table = table.borrow_mut();
        if let Some(sym) = table.get(lexeme) {
            return sym.clone();
        }
        let sym = Symbol(Rc::from(lexeme));
        table.insert(lexeme.to_string(), sym.clone());
        sym
    })
}

/// The reserved words the evaluator dispatches on by identity. Interned once
/// per thread, on first access.
#[derive(Clone)]
pub struct Reserved {
    pub def: Symbol,
    pub quote: Symbol,
    pub fn_: Symbol,
    pub macro_: Symbol,
    pub if_: Symbol,
    pub begin: Symbol,
}

thread_local! {
    static RESERVED: Reserved = Reserved {
        def: intern("def"),
        quote: intern("quote"),
        fn_: intern("fn"),
        macro_: intern("macro"),
        if_: intern("if"),
        begin: intern("begin"),
    };
}

pub fn reserved() -> Reserved {
    RESERVED.with(|r| r.clone())
}
