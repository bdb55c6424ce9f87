mod require_identity;
