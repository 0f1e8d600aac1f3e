pub mod fault_kind;
