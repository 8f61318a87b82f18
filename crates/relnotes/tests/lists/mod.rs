mod not_configured;
